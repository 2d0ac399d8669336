//! Pure trail-matching logic.
//!
//! Decides which trail rules apply to a skill and which recommendations
//! should be written as a result. The module performs no I/O: candidates and
//! the set of already-recommended titles are supplied by the caller, so every
//! decision here is unit-testable without a database.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::recommendation::NewRecommendation;
use super::skill::Skill;
use super::trail::Trail;

/// Whether a trail rule admits the given skill.
///
/// All three conditions must hold:
/// - the rule's related skill equals the skill name, exactly and
///   case-sensitively;
/// - the rule's area equals the user's area of interest, or the user has no
///   area of interest (wildcard);
/// - the rule's minimum level does not exceed the skill level.
pub fn trail_admits(trail: &Trail, skill: &Skill, area_of_interest: Option<&str>) -> bool {
    trail.related_skill == skill.name
        && area_of_interest.is_none_or(|area| trail.area_of_interest == area)
        && trail.minimum_level <= skill.level
}

/// Filter candidates down to admitted trails, deduplicated by recommendation
/// title within this batch.
///
/// Several rules may carry the same title; only the first admitted one
/// survives, so a single evaluation run can never plan two recommendations
/// with the same title for the user.
pub fn admitted_trails<'a>(
    candidates: &'a [Trail],
    skill: &Skill,
    area_of_interest: Option<&str>,
) -> Vec<&'a Trail> {
    let mut seen_titles = HashSet::new();
    candidates
        .iter()
        .filter(|trail| trail_admits(trail, skill, area_of_interest))
        .filter(|trail| seen_titles.insert(trail.title.as_str()))
        .collect()
}

/// Plan the recommendations to persist for a skill evaluation.
///
/// `existing_titles` holds titles the user already has a recommendation for;
/// admitted trails carrying one of those titles are skipped silently. The
/// function always succeeds and may return an empty plan.
pub fn plan_recommendations(
    candidates: &[Trail],
    skill: &Skill,
    area_of_interest: Option<&str>,
    existing_titles: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<NewRecommendation> {
    admitted_trails(candidates, skill, area_of_interest)
        .into_iter()
        .filter(|trail| !existing_titles.contains(&trail.title))
        .map(|trail| NewRecommendation {
            user_id: skill.user_id,
            title: trail.title.clone(),
            description: trail.description.clone(),
            created_at: now,
        })
        .collect()
}
