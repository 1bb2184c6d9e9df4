/// start.gg GraphQL wire types — serde shapes for the request envelope and
/// the three query responses. These map to the clean domain types via the
/// free functions in client.rs.
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Request envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GqlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub struct TournamentVars<'a> {
    pub slug: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EventVars {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct StandingsVars<'a> {
    pub id: i64,
    #[serde(rename = "numTeams")]
    pub num_teams: u32,
    pub sort: &'a str,
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GqlError>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GqlError {
    pub message: String,
}

impl fmt::Display for GqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// TournamentQuery — events of a tournament by slug
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TournamentData {
    pub tournament: Option<TournamentNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TournamentNode {
    pub events: Option<Vec<EventNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventNode {
    pub id: Option<i64>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// EventQuery — phases of an event
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventData {
    pub event: Option<EventDetailNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventDetailNode {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phases: Option<Vec<PhaseNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PhaseNode {
    pub id: Option<i64>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// PhaseQuery — ranked standings of a phase
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PhaseData {
    pub phase: Option<PhaseDetailNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PhaseDetailNode {
    pub name: Option<String>,
    #[serde(rename = "phaseGroups")]
    pub phase_groups: Option<PhaseGroups>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PhaseGroups {
    pub nodes: Option<Vec<PhaseGroupNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PhaseGroupNode {
    pub standings: Option<StandingsPage>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsPage {
    pub nodes: Option<Vec<StandingNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingNode {
    pub placement: Option<u32>,
    pub entrant: Option<EntrantNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EntrantNode {
    pub name: Option<String>,
    pub team: Option<TeamNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamNode {
    pub members: Option<Vec<MemberNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MemberNode {
    #[serde(rename = "isAlternate")]
    pub is_alternate: Option<bool>,
    pub player: Option<PlayerNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerNode {
    #[serde(rename = "gamerTag")]
    pub gamer_tag: Option<String>,
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct UserNode {
    pub authorizations: Option<Vec<AuthorizationNode>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AuthorizationNode {
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Query text
// ---------------------------------------------------------------------------

pub const TOURNAMENT_EVENTS_QUERY: &str = "\
query TournamentQuery($slug: String) {
    tournament(slug: $slug) {
        events {
            id
            name
        }
    }
}";

pub const EVENT_PHASES_QUERY: &str = "\
query EventQuery($id: ID) {
    event(id: $id) {
        id
        name
        phases {
            id
            name
        }
    }
}";

/// NA standings shape: includes the linked external account id per player.
pub const PHASE_STANDINGS_QUERY: &str = "\
query PhaseQuery($id: ID, $numTeams: Int, $sort: String) {
    phase(id: $id) {
        name
        phaseGroups(query: { page: 1, perPage: 1 }) {
            nodes {
                standings(query: { perPage: $numTeams, page: 1, sortBy: $sort }) {
                    nodes {
                        placement
                        entrant {
                            name
                            team {
                                members(status: ACCEPTED) {
                                    isAlternate
                                    player {
                                        gamerTag
                                        user {
                                            authorizations(types: [EPIC]) {
                                                externalId
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}";

/// EU standings shape: no external account integration, so the user
/// sub-query is omitted.
pub const PHASE_STANDINGS_QUERY_EU: &str = "\
query PhaseQuery($id: ID, $numTeams: Int, $sort: String) {
    phase(id: $id) {
        name
        phaseGroups(query: { page: 1, perPage: 1 }) {
            nodes {
                standings(query: { perPage: $numTeams, page: 1, sortBy: $sort }) {
                    nodes {
                        placement
                        entrant {
                            name
                            team {
                                members(status: ACCEPTED) {
                                    isAlternate
                                    player {
                                        gamerTag
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}";
