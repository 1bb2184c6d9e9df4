pub mod client;
pub mod gql;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the GraphQL wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: i64,
    pub name: String, // "Qualifier #3: North America", "Invitational", ...
}

#[derive(Debug, Clone, Default)]
pub struct Phase {
    pub id: i64,
    pub name: String, // "Day 1: Swiss", "Day 3: Bracket", "Tiebreaker", ...
}

/// One ranked placement row for a phase. Standings come back sorted by
/// placement ascending; that order is the rank and must be preserved.
#[derive(Debug, Clone, Default)]
pub struct Standing {
    pub placement: u32,
    pub entrant: Entrant,
}

#[derive(Debug, Clone, Default)]
pub struct Entrant {
    pub name: String,
    pub team: Team,
}

/// Roster of an entrant. Solo entrants are a team of one.
#[derive(Debug, Clone, Default)]
pub struct Team {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default)]
pub struct Member {
    pub gamertag: String,
    pub is_alternate: bool,
    /// Linked external account id, only present on regions where the
    /// standings query asks for it.
    pub external_id: Option<String>,
}

impl Member {
    /// Display string used in the promotion lists: the gamertag, with the
    /// external account id appended when one is linked.
    pub fn display_name(&self) -> String {
        match &self.external_id {
            Some(id) => format!("{} ({id})", self.gamertag),
            None => self.gamertag.clone(),
        }
    }
}

/// Regional circuit a tournament belongs to, inferred from its URL slug.
/// Drives the standings query shape and the promotion thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    Na,
    Eu,
    #[default]
    Unknown,
}

impl Region {
    /// Infer the region from a tournament slug, e.g.
    /// "rlcs-2022-23-fall-open-north-america" or "...-regional-3-europe".
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.to_ascii_lowercase();
        if slug.contains("north-america") || slug.ends_with("-na") {
            Region::Na
        } else if slug.contains("europe") || slug.ends_with("-eu") {
            Region::Eu
        } else {
            Region::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Na => "NA",
            Region::Eu => "EU",
            Region::Unknown => "UNKNOWN",
        }
    }
}
