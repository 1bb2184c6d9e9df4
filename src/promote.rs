use startgg_api::{Region, Standing};

// ---------------------------------------------------------------------------
// Promotion tiers
// ---------------------------------------------------------------------------

/// Ordered promotion tiers, lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum PromotionRank {
    #[default]
    BPlus,
    A,
    X, // Main Event
}

impl PromotionRank {
    pub const ALL: [PromotionRank; 3] = [PromotionRank::BPlus, PromotionRank::A, PromotionRank::X];

    pub fn label(&self) -> &'static str {
        match self {
            PromotionRank::BPlus => "BPLUS",
            PromotionRank::A => "A",
            PromotionRank::X => "X",
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            PromotionRank::BPlus => None,
            PromotionRank::A => Some(PromotionRank::BPlus),
            PromotionRank::X => Some(PromotionRank::A),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            PromotionRank::BPlus => Some(PromotionRank::A),
            PromotionRank::A => Some(PromotionRank::X),
            PromotionRank::X => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The promotion lists, one ordered list of display strings per tier.
/// Insertion order is placement order and is preserved into the report.
#[derive(Debug, Clone, Default)]
pub struct PromotionSet {
    tiers: [Vec<String>; 3],
}

impl PromotionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self, rank: PromotionRank) -> &[String] {
        &self.tiers[rank.index()]
    }

    pub(crate) fn push(&mut self, rank: PromotionRank, name: String) {
        self.tiers[rank.index()].push(name);
    }

    /// Remove an earlier placement of `name`, scanning from `rank` down
    /// through the lower tiers. Only the first occurrence found is removed;
    /// a member holds at most one lower-tier entry at this point.
    fn evict_at_or_below(&mut self, rank: PromotionRank, name: &str) {
        let mut tier = Some(rank);
        while let Some(current) = tier {
            let names = &mut self.tiers[current.index()];
            if let Some(pos) = names.iter().position(|n| n == name) {
                names.remove(pos);
                return;
            }
            tier = current.prev();
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Placement thresholds per region. `pool` teams are fetched for the first
/// pass, the top `cutoff` of them earn Rank A and the rest Rank B+;
/// `finals_pool` teams are fetched for the second pass and earn Rank X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub pool: u32,
    pub cutoff: u32,
    pub finals_pool: u32,
}

impl Thresholds {
    /// Unknown regions fall back to the NA numbers; the caller warns.
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Na | Region::Unknown => Thresholds {
                pool: 48,
                cutoff: 24,
                finals_pool: 16,
            },
            Region::Eu => Thresholds {
                pool: 64,
                cutoff: 32,
                finals_pool: 16,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Walk `standings` in placement order and credit every accepted team member
/// at the tier their team's placement earns: indexes below `cutoff` target
/// one tier above `base_rank`, the rest target `base_rank` itself.
///
/// On the second pass (`base_rank` above B+) a member may already hold an
/// entry from the first pass; it is evicted from the lower tier before the
/// higher entry is appended, so nobody is credited twice.
///
/// The caller validates that `standings` holds exactly the requested number
/// of teams before invoking this.
pub fn classify(
    standings: &[Standing],
    base_rank: PromotionRank,
    cutoff: usize,
    remove_alternates: bool,
    promotions: &mut PromotionSet,
) {
    let promoted_rank = base_rank.next().unwrap_or(base_rank);
    for (i, standing) in standings.iter().enumerate() {
        let target = if i < cutoff { promoted_rank } else { base_rank };
        for member in &standing.entrant.team.members {
            if member.is_alternate && remove_alternates {
                continue;
            }
            let name = member.display_name();
            if base_rank > PromotionRank::BPlus {
                promotions.evict_at_or_below(target, &name);
            }
            promotions.push(target, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startgg_api::{Entrant, Member, Standing, Team};

    fn member(tag: &str) -> Member {
        Member {
            gamertag: tag.into(),
            is_alternate: false,
            external_id: None,
        }
    }

    fn alternate(tag: &str) -> Member {
        Member {
            is_alternate: true,
            ..member(tag)
        }
    }

    fn standing(placement: u32, members: Vec<Member>) -> Standing {
        Standing {
            placement,
            entrant: Entrant {
                name: format!("Team {placement}"),
                team: Team { members },
            },
        }
    }

    fn solo_standings(count: u32) -> Vec<Standing> {
        (1..=count)
            .map(|i| standing(i, vec![member(&format!("p{i}"))]))
            .collect()
    }

    #[test]
    fn rank_ordering_and_adjacency() {
        assert!(PromotionRank::BPlus < PromotionRank::A);
        assert!(PromotionRank::A < PromotionRank::X);
        assert_eq!(PromotionRank::BPlus.next(), Some(PromotionRank::A));
        assert_eq!(PromotionRank::X.next(), None);
        assert_eq!(PromotionRank::X.prev(), Some(PromotionRank::A));
        assert_eq!(PromotionRank::BPlus.prev(), None);
    }

    #[test]
    fn first_pass_splits_pool_at_cutoff() {
        let standings = solo_standings(30);
        let mut promotions = PromotionSet::new();
        classify(&standings, PromotionRank::BPlus, 10, true, &mut promotions);

        let a: Vec<_> = (1..=10).map(|i| format!("p{i}")).collect();
        let bplus: Vec<_> = (11..=30).map(|i| format!("p{i}")).collect();
        assert_eq!(promotions.names(PromotionRank::A), a.as_slice());
        assert_eq!(promotions.names(PromotionRank::BPlus), bplus.as_slice());
        assert!(promotions.names(PromotionRank::X).is_empty());
    }

    #[test]
    fn second_pass_promotes_and_evicts_lower_entry() {
        // Pass 1: indexes 0-9 -> A, 10-29 -> B+.
        let day3 = solo_standings(30);
        let mut promotions = PromotionSet::new();
        classify(&day3, PromotionRank::BPlus, 10, true, &mut promotions);

        // Pass 2 over the top 16 of the same field, cutoff 5:
        // indexes 0-4 -> X, 5-15 -> A.
        let finals: Vec<Standing> = day3[..16].to_vec();
        classify(&finals, PromotionRank::A, 5, true, &mut promotions);

        // p4 (original index 3) moved A -> X and appears only in X.
        assert!(promotions.names(PromotionRank::X).contains(&"p4".to_string()));
        assert!(!promotions.names(PromotionRank::A).contains(&"p4".to_string()));
        // p12 (original index 11) moved B+ -> A.
        assert!(promotions.names(PromotionRank::A).contains(&"p12".to_string()));
        assert!(!promotions.names(PromotionRank::BPlus).contains(&"p12".to_string()));
        // p20 stayed in B+ only.
        assert!(promotions.names(PromotionRank::BPlus).contains(&"p20".to_string()));
    }

    #[test]
    fn no_name_in_two_tiers_after_second_pass() {
        let day3 = solo_standings(48);
        let mut promotions = PromotionSet::new();
        classify(&day3, PromotionRank::BPlus, 24, true, &mut promotions);
        let finals: Vec<Standing> = day3[..16].to_vec();
        classify(&finals, PromotionRank::A, 16, true, &mut promotions);

        for rank in PromotionRank::ALL {
            for name in promotions.names(rank) {
                let hits: usize = PromotionRank::ALL
                    .iter()
                    .filter(|r| promotions.names(**r).contains(name))
                    .count();
                assert_eq!(hits, 1, "{name} appears in {hits} tiers");
            }
        }
    }

    #[test]
    fn eviction_scans_full_tier_depth() {
        // A name seeded straight into B+ must still be evicted when it is
        // re-promoted two tiers up, into X.
        let mut promotions = PromotionSet::new();
        promotions.push(PromotionRank::BPlus, "deep".into());

        let finals = vec![standing(1, vec![member("deep")])];
        classify(&finals, PromotionRank::A, 1, true, &mut promotions);

        assert_eq!(promotions.names(PromotionRank::X), ["deep".to_string()]);
        assert!(promotions.names(PromotionRank::A).is_empty());
        assert!(promotions.names(PromotionRank::BPlus).is_empty());
    }

    #[test]
    fn eviction_removes_only_first_hit_scanning_downward() {
        // Same name in both A and B+: the scan starts at the target tier,
        // removes the A entry, and stops before reaching B+.
        let mut promotions = PromotionSet::new();
        promotions.push(PromotionRank::A, "dup".into());
        promotions.push(PromotionRank::BPlus, "dup".into());

        promotions.evict_at_or_below(PromotionRank::X, "dup");
        assert!(promotions.names(PromotionRank::A).is_empty());
        assert_eq!(promotions.names(PromotionRank::BPlus), ["dup".to_string()]);
    }

    #[test]
    fn alternates_skipped_when_removal_enabled() {
        let standings = vec![
            standing(1, vec![member("starter1"), alternate("sub1")]),
            standing(2, vec![member("starter2"), alternate("sub2")]),
        ];
        let mut promotions = PromotionSet::new();
        classify(&standings, PromotionRank::BPlus, 1, true, &mut promotions);

        assert_eq!(promotions.names(PromotionRank::A), ["starter1".to_string()]);
        assert_eq!(promotions.names(PromotionRank::BPlus), ["starter2".to_string()]);
    }

    #[test]
    fn alternates_kept_when_removal_disabled() {
        let standings = vec![standing(1, vec![member("starter"), alternate("sub")])];
        let mut promotions = PromotionSet::new();
        classify(&standings, PromotionRank::BPlus, 1, false, &mut promotions);

        assert_eq!(
            promotions.names(PromotionRank::A),
            ["starter".to_string(), "sub".to_string()]
        );
    }

    #[test]
    fn every_team_member_credited_at_team_placement() {
        let standings = vec![standing(1, vec![member("a"), member("b"), member("c")])];
        let mut promotions = PromotionSet::new();
        classify(&standings, PromotionRank::BPlus, 0, true, &mut promotions);

        assert_eq!(
            promotions.names(PromotionRank::BPlus),
            ["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn external_ids_flow_into_display_strings() {
        let mut with_id = member("tagged");
        with_id.external_id = Some("epic-9".into());
        let standings = vec![standing(1, vec![with_id])];
        let mut promotions = PromotionSet::new();
        classify(&standings, PromotionRank::BPlus, 1, true, &mut promotions);

        assert_eq!(
            promotions.names(PromotionRank::A),
            ["tagged (epic-9)".to_string()]
        );
    }

    #[test]
    fn na_thresholds() {
        assert_eq!(
            Thresholds::for_region(Region::Na),
            Thresholds { pool: 48, cutoff: 24, finals_pool: 16 }
        );
    }

    #[test]
    fn eu_thresholds() {
        assert_eq!(
            Thresholds::for_region(Region::Eu),
            Thresholds { pool: 64, cutoff: 32, finals_pool: 16 }
        );
    }

    #[test]
    fn unknown_region_falls_back_to_na_thresholds() {
        assert_eq!(
            Thresholds::for_region(Region::Unknown),
            Thresholds::for_region(Region::Na)
        );
    }

    #[test]
    fn full_finals_cutoff_sends_whole_pool_to_x() {
        let day3 = solo_standings(48);
        let mut promotions = PromotionSet::new();
        classify(&day3, PromotionRank::BPlus, 24, true, &mut promotions);
        let finals: Vec<Standing> = day3[..16].to_vec();
        classify(&finals, PromotionRank::A, 16, true, &mut promotions);

        let x: Vec<_> = (1..=16).map(|i| format!("p{i}")).collect();
        assert_eq!(promotions.names(PromotionRank::X), x.as_slice());
        // Everyone in X came out of A; A keeps only indexes 17-24.
        let a: Vec<_> = (17..=24).map(|i| format!("p{i}")).collect();
        assert_eq!(promotions.names(PromotionRank::A), a.as_slice());
    }
}
