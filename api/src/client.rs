use crate::gql::{
    EVENT_PHASES_QUERY, EventData, EventNode, EventVars, GqlError, GqlRequest, GqlResponse,
    MemberNode, PHASE_STANDINGS_QUERY, PHASE_STANDINGS_QUERY_EU, PhaseData, PhaseNode,
    StandingNode, StandingsVars, TOURNAMENT_EVENTS_QUERY, TournamentData, TournamentVars,
};
use crate::{Entrant, Event, Member, Phase, Region, Standing, Team};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STARTGG_ENDPOINT: &str = "https://api.start.gg/gql/alpha";

/// start.gg GraphQL client. One fixed endpoint, bearer-token authenticated.
#[derive(Debug, Clone)]
pub struct StartggApi {
    client: Client,
    endpoint: String,
    token: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    /// The endpoint rejected the bearer token (HTTP 401/403).
    Auth(String),
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Graphql(Vec<GqlError>),
    NotFound(String),
    /// The standings page did not contain exactly the requested number of
    /// teams. Raised before any classification happens.
    StandingsCount { expected: usize, actual: usize },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Auth(msg) => write!(f, "Authentication failed: {msg}"),
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Graphql(errors) => {
                write!(f, "GraphQL errors: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::StandingsCount { expected, actual } => write!(
                f,
                "standings query returned an incorrect number of teams: expected {expected}, got {actual}"
            ),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl StartggApi {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, STARTGG_ENDPOINT)
    }

    /// Client against a non-default endpoint. Used by tests against a local
    /// mock server.
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("gg-promotions/0.1 (promotion list builder)")
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            token: token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch the events of a tournament by its URL slug.
    pub async fn tournament_events(&self, slug: &str) -> ApiResult<Vec<Event>> {
        let request = GqlRequest {
            query: TOURNAMENT_EVENTS_QUERY,
            operation_name: "TournamentQuery",
            variables: TournamentVars { slug },
        };
        let data: TournamentData = self.post(&request).await?;
        let events = data
            .tournament
            .ok_or_else(|| ApiError::NotFound(format!("no tournament for slug \"{slug}\"")))?
            .events
            .unwrap_or_default();
        Ok(events.into_iter().filter_map(map_event).collect())
    }

    /// Fetch the phases of an event.
    pub async fn event_phases(&self, event_id: i64) -> ApiResult<Vec<Phase>> {
        let request = GqlRequest {
            query: EVENT_PHASES_QUERY,
            operation_name: "EventQuery",
            variables: EventVars { id: event_id },
        };
        let data: EventData = self.post(&request).await?;
        let phases = data
            .event
            .ok_or_else(|| ApiError::NotFound(format!("no event with id {event_id}")))?
            .phases
            .unwrap_or_default();
        Ok(phases.into_iter().filter_map(map_phase).collect())
    }

    /// Fetch the top `count` standings of a phase, sorted by placement.
    /// Single page; the phase's only pool group is queried. The EU query
    /// shape omits the external-account sub-query.
    ///
    /// Errors with [`ApiError::StandingsCount`] when the page does not hold
    /// exactly `count` teams, so classification never runs on a short page.
    pub async fn phase_standings(
        &self,
        phase_id: i64,
        count: u32,
        region: Region,
    ) -> ApiResult<Vec<Standing>> {
        let query = match region {
            Region::Eu => PHASE_STANDINGS_QUERY_EU,
            Region::Na | Region::Unknown => PHASE_STANDINGS_QUERY,
        };
        let request = GqlRequest {
            query,
            operation_name: "PhaseQuery",
            variables: StandingsVars {
                id: phase_id,
                num_teams: count,
                sort: "placement",
            },
        };
        let data: PhaseData = self.post(&request).await?;
        let nodes = data
            .phase
            .and_then(|p| p.phase_groups)
            .and_then(|g| g.nodes)
            .and_then(|mut groups| {
                if groups.is_empty() {
                    None
                } else {
                    groups.swap_remove(0).standings
                }
            })
            .and_then(|s| s.nodes)
            .ok_or_else(|| ApiError::NotFound(format!("no standings for phase {phase_id}")))?;

        let standings: Vec<Standing> = nodes.into_iter().filter_map(map_standing).collect();
        if standings.len() != count as usize {
            return Err(ApiError::StandingsCount {
                expected: count as usize,
                actual: standings.len(),
            });
        }
        Ok(standings)
    }

    async fn post<V, T>(&self, request: &GqlRequest<'_, V>) -> ApiResult<T>
    where
        V: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, self.endpoint.clone()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(format!(
                "{} rejected the token (HTTP {status})",
                self.endpoint
            )));
        }

        let envelope: GqlResponse<T> = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, self.endpoint.clone()))?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, self.endpoint.clone()))?;

        match (envelope.data, envelope.errors) {
            (_, Some(errors)) if !errors.is_empty() => Err(ApiError::Graphql(errors)),
            (Some(data), _) => Ok(data),
            (None, _) => Err(ApiError::NotFound(
                "GraphQL response carried neither data nor errors".into(),
            )),
        }
    }
}

/// Pick the event whose name marks it as the qualifier bracket. When
/// several names match, the last one listed wins.
pub fn select_qualifier_event(events: &[Event]) -> ApiResult<&Event> {
    events
        .iter()
        .rev()
        .find(|e| e.name.to_ascii_lowercase().contains("qualifier"))
        .ok_or_else(|| {
            ApiError::NotFound(
                "no event named like a Qualifier; check the tournament slug".into(),
            )
        })
}

/// Pick the final-day phase. Day 1/2 pools and tiebreakers are skipped;
/// promotions are read off the "Day 3" bracket only. When several names
/// match, the last one listed wins.
pub fn select_day3_phase(phases: &[Phase]) -> ApiResult<&Phase> {
    phases
        .iter()
        .rev()
        .find(|p| p.name.to_ascii_lowercase().contains("day 3"))
        .ok_or_else(|| {
            ApiError::NotFound("no \"Day 3\" phase found; has the bracket format changed?".into())
        })
}

// ---------------------------------------------------------------------------
// Mapping: GraphQL wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_event(node: EventNode) -> Option<Event> {
    Some(Event {
        id: node.id?,
        name: node.name?,
    })
}

fn map_phase(node: PhaseNode) -> Option<Phase> {
    Some(Phase {
        id: node.id?,
        name: node.name?,
    })
}

fn map_standing(node: StandingNode) -> Option<Standing> {
    let entrant = node.entrant?;
    let members = entrant
        .team
        .and_then(|t| t.members)
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_member)
        .collect();
    Some(Standing {
        placement: node.placement.unwrap_or_default(),
        entrant: Entrant {
            name: entrant.name.unwrap_or_default(),
            team: Team { members },
        },
    })
}

fn map_member(node: MemberNode) -> Option<Member> {
    let player = node.player?;
    let external_id = player
        .user
        .and_then(|u| u.authorizations)
        .unwrap_or_default()
        .into_iter()
        .find_map(|a| a.external_id);
    Some(Member {
        gamertag: player.gamer_tag?,
        is_alternate: node.is_alternate.unwrap_or(false),
        external_id,
    })
}
