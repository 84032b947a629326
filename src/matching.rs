use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::models::{Job, UserProfile};

pub const BASE_SCORE: i32 = 50;
pub const DEFAULT_MIN_SCORE: i32 = 70;
pub const DEFAULT_JITTER: f64 = 5.0;
pub const MAX_JITTER: f64 = 100.0;

const FALLBACK_LOCATION: &str = "Stockholm";

const FILLER_REASONS: &[&str] = &[
    "Populärt uppdrag i ditt område",
    "Hög efterfrågan just nu",
    "Bra betyg från tidigare hjälpare",
    "Flexibla tider",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchColor {
    Green,
    Orange,
    Red,
}

impl MatchColor {
    pub fn hex(&self) -> &'static str {
        match self {
            MatchColor::Green => "#2E8B57",
            MatchColor::Orange => "#FFA500",
            MatchColor::Red => "#FF6B6B",
        }
    }
}

impl fmt::Display for MatchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchColor::Green => write!(f, "green"),
            MatchColor::Orange => write!(f, "orange"),
            MatchColor::Red => write!(f, "red"),
        }
    }
}

/// Symmetric containment over lowercased, trimmed strings. Empty input never matches.
pub fn skills_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Leading integer of a price label ("450 kr" -> 450). None when there is no numeric prefix.
pub fn price_prefix(price: &str) -> Option<i64> {
    let re = regex::Regex::new(r"^\s*([+-]?\d+)").ok()?;
    let caps = re.captures(price)?;
    caps.get(1)?.as_str().parse().ok()
}

fn effective_location(location: &str) -> &str {
    let location = location.trim();
    if location.is_empty() {
        FALLBACK_LOCATION
    } else {
        location
    }
}

fn location_matches(job: &Job, user_location: &str) -> bool {
    job.location
        .to_lowercase()
        .contains(&effective_location(user_location).to_lowercase())
}

fn matching_skills<'a>(job: &'a Job, user_skills: &[String]) -> Vec<&'a str> {
    job.skills
        .iter()
        .filter(|skill| user_skills.iter().any(|us| skills_match(skill, us)))
        .map(|s| s.as_str())
        .collect()
}

fn is_short_job(job: &Job) -> bool {
    job.time.contains("1-2") || job.time.contains("2-3")
}

fn is_mid_range_price(job: &Job) -> bool {
    matches!(price_prefix(&job.price), Some(p) if (400..=800).contains(&p))
}

/// Score before jitter, always within [0, 100].
pub fn base_score(job: &Job, user_location: &str, user_skills: &[String]) -> i32 {
    let mut score = BASE_SCORE;

    // Location
    if location_matches(job, user_location) {
        score += 20;
    } else if job.location.contains(FALLBACK_LOCATION) {
        score += 10;
    }

    // Skills
    score += 15 * matching_skills(job, user_skills).len() as i32;

    // Duration: shorter jobs first
    if is_short_job(job) {
        score += 10;
    } else if job.time.contains("Halvdag") {
        score += 5;
    }

    // Price: mid-range preferred
    if is_mid_range_price(job) {
        score += 10;
    }

    score.clamp(0, 100)
}

fn apply_jitter<R: Rng + ?Sized>(score: i32, amplitude: f64, rng: &mut R) -> i32 {
    let jitter = if amplitude > 0.0 && amplitude.is_finite() {
        let amplitude = amplitude.min(MAX_JITTER);
        rng.gen_range(-amplitude..=amplitude)
    } else {
        0.0
    };
    // Halves round up, no re-clamp
    (score as f64 + jitter + 0.5).floor() as i32
}

/// Rescore every job in place against the user's location and skills.
pub fn calculate_match_scores<R: Rng + ?Sized>(
    jobs: &mut [Job],
    user_location: &str,
    user_skills: &[String],
    jitter: f64,
    rng: &mut R,
) {
    for job in jobs.iter_mut() {
        let base = base_score(job, user_location, user_skills);
        job.match_score = apply_jitter(base, jitter, rng);
        tracing::debug!(job_id = job.id, base, score = job.match_score, "scored job");
    }
}

/// Two or three short explanations of why a job fits the user.
pub fn match_reasons<R: Rng + ?Sized>(job: &Job, user: &UserProfile, rng: &mut R) -> Vec<String> {
    let mut reasons: Vec<String> = Vec::new();

    if location_matches(job, &user.location) {
        reasons.push("Nära din plats".to_string());
    }

    let skills = matching_skills(job, &user.skills);
    if !skills.is_empty() {
        reasons.push(format!("Matchar dina kompetenser: {}", skills.join(", ")));
    }

    if is_short_job(job) {
        reasons.push("Passar din kalender".to_string());
    }

    if is_mid_range_price(job) {
        reasons.push("Bra betalning".to_string());
    }

    while reasons.len() < 2 {
        let Some(filler) = FILLER_REASONS.choose(rng) else { break };
        if !reasons.iter().any(|r| r == filler) {
            reasons.push(filler.to_string());
        }
    }

    reasons.truncate(3);
    reasons
}

pub fn match_score_color(score: i32) -> MatchColor {
    if score >= 80 {
        MatchColor::Green
    } else if score >= 60 {
        MatchColor::Orange
    } else {
        MatchColor::Red
    }
}

/// Jobs scoring at least `min_score`, in their original order.
pub fn filter_by_match(jobs: &[Job], min_score: i32) -> Vec<&Job> {
    jobs.iter().filter(|j| j.match_score >= min_score).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_jobs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn default_skills() -> Vec<String> {
        vec![
            "Möbelmontering".to_string(),
            "Tekniksupport".to_string(),
            "Flytthjälp".to_string(),
        ]
    }

    fn user(location: &str) -> UserProfile {
        UserProfile {
            location: location.to_string(),
            skills: default_skills(),
            ..UserProfile::default()
        }
    }

    fn job(location: &str, time: &str, price: &str, skills: &[&str]) -> Job {
        Job {
            id: 1,
            title: "Test".to_string(),
            description: String::new(),
            price: price.to_string(),
            location: location.to_string(),
            time: time.to_string(),
            category: "other".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            author: "Test".to_string(),
            date: "Idag".to_string(),
            icon: String::new(),
            match_score: 0,
        }
    }

    #[test]
    fn test_base_scores_for_sample_jobs() {
        let skills = default_skills();
        let scores: Vec<i32> = sample_jobs()
            .iter()
            .map(|j| base_score(j, "Stockholm", &skills))
            .collect();
        assert_eq!(scores, vec![100, 85, 95, 80, 70, 90]);
    }

    #[test]
    fn test_base_score_is_clamped() {
        let j = job(
            "Stockholm",
            "1-2 timmar",
            "500 kr",
            &["Möbelmontering", "Tekniksupport", "Flytt"],
        );
        assert_eq!(base_score(&j, "Stockholm", &default_skills()), 100);

        let mut rng = StdRng::seed_from_u64(7);
        let mut jobs = sample_jobs();
        calculate_match_scores(&mut jobs, "Göteborg", &default_skills(), 5.0, &mut rng);
        for j in &jobs {
            let base = base_score(j, "Göteborg", &default_skills());
            assert!((0..=100).contains(&base));
        }
    }

    #[test]
    fn test_direct_location_beats_stockholm_fallback() {
        let skills: Vec<String> = Vec::new();
        let local = job("Uppsala, Centrum", "Helgdag", "1200 kr", &[]);
        let fallback = job("Stockholm, Bromma", "Helgdag", "1200 kr", &[]);
        let neither = job("Malmö", "Helgdag", "1200 kr", &[]);

        assert_eq!(base_score(&local, "Uppsala", &skills), 70);
        assert_eq!(base_score(&fallback, "Uppsala", &skills), 60);
        assert_eq!(base_score(&neither, "Uppsala", &skills), 50);
    }

    #[test]
    fn test_location_match_is_case_insensitive() {
        let j = job("STOCKHOLM, Södermalm", "Helgdag", "x", &[]);
        assert_eq!(base_score(&j, "stockholm", &[]), 70);
    }

    #[test]
    fn test_empty_location_falls_back_to_stockholm() {
        let j = job("Stockholm, Vasastan", "Helgdag", "x", &[]);
        assert_eq!(base_score(&j, "", &[]), 70);
    }

    #[test]
    fn test_skills_match_is_symmetric() {
        assert!(skills_match("Flytt", "Flytthjälp"));
        assert!(skills_match("Flytthjälp", "flytt"));
        assert!(!skills_match("Transport", "Flytthjälp"));
        assert!(!skills_match("", "Flytthjälp"));
        assert!(!skills_match("Flytthjälp", "  "));
    }

    #[test]
    fn test_each_matching_skill_adds_fifteen() {
        let none = job("Malmö", "Helgdag", "x", &["Måleri"]);
        let one = job("Malmö", "Helgdag", "x", &["Måleri", "Tekniksupport"]);
        let two = job("Malmö", "Helgdag", "x", &["Flytt", "Tekniksupport"]);
        let skills = default_skills();
        assert_eq!(base_score(&none, "Umeå", &skills), 50);
        assert_eq!(base_score(&one, "Umeå", &skills), 65);
        assert_eq!(base_score(&two, "Umeå", &skills), 80);
    }

    #[test]
    fn test_duration_bonus() {
        let skills: Vec<String> = Vec::new();
        assert_eq!(base_score(&job("Malmö", "1-2 timmar", "x", &[]), "Umeå", &skills), 60);
        assert_eq!(base_score(&job("Malmö", "2-3 timmar", "x", &[]), "Umeå", &skills), 60);
        assert_eq!(base_score(&job("Malmö", "Halvdag", "x", &[]), "Umeå", &skills), 55);
        assert_eq!(base_score(&job("Malmö", "3-4 timmar", "x", &[]), "Umeå", &skills), 50);
    }

    #[test]
    fn test_price_prefix() {
        assert_eq!(price_prefix("450 kr"), Some(450));
        assert_eq!(price_prefix("  800kr"), Some(800));
        assert_eq!(price_prefix("-20 kr"), Some(-20));
        assert_eq!(price_prefix("1 200 kr"), Some(1));
        assert_eq!(price_prefix("kr 450"), None);
        assert_eq!(price_prefix(""), None);
    }

    #[test]
    fn test_price_bonus_bounds_are_inclusive() {
        let skills: Vec<String> = Vec::new();
        for (price, expected) in [("399 kr", 50), ("400 kr", 60), ("800 kr", 60), ("801 kr", 50), ("gratis", 50)] {
            let j = job("Malmö", "Helgdag", price, &[]);
            assert_eq!(base_score(&j, "Umeå", &skills), expected, "price {}", price);
        }
    }

    #[test]
    fn test_scoring_without_jitter_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut jobs = sample_jobs();
        calculate_match_scores(&mut jobs, "Stockholm", &default_skills(), 0.0, &mut rng);
        let first: Vec<i32> = jobs.iter().map(|j| j.match_score).collect();
        calculate_match_scores(&mut jobs, "Stockholm", &default_skills(), 0.0, &mut rng);
        let second: Vec<i32> = jobs.iter().map(|j| j.match_score).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![100, 85, 95, 80, 70, 90]);
    }

    #[test]
    fn test_jitter_stays_within_amplitude() {
        let skills = default_skills();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut jobs = sample_jobs();
            calculate_match_scores(&mut jobs, "Stockholm", &skills, DEFAULT_JITTER, &mut rng);
            for j in &jobs {
                let base = base_score(j, "Stockholm", &skills);
                assert!((j.match_score - base).abs() <= 5, "{} vs {}", j.match_score, base);
            }
        }
    }

    #[test]
    fn test_jitter_is_reproducible_with_seed() {
        let skills = default_skills();
        let mut a = sample_jobs();
        let mut b = sample_jobs();
        calculate_match_scores(&mut a, "Stockholm", &skills, 5.0, &mut StdRng::seed_from_u64(42));
        calculate_match_scores(&mut b, "Stockholm", &skills, 5.0, &mut StdRng::seed_from_u64(42));
        let sa: Vec<i32> = a.iter().map(|j| j.match_score).collect();
        let sb: Vec<i32> = b.iter().map(|j| j.match_score).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_reasons_with_many_conditions_are_truncated() {
        let mut rng = StdRng::seed_from_u64(3);
        let jobs = sample_jobs();
        let reasons = match_reasons(&jobs[0], &user("Stockholm"), &mut rng);
        assert_eq!(
            reasons,
            vec![
                "Nära din plats".to_string(),
                "Matchar dina kompetenser: Möbelmontering".to_string(),
                "Passar din kalender".to_string(),
            ]
        );
    }

    #[test]
    fn test_reasons_are_padded_with_fillers() {
        let jobs = sample_jobs();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Painting job only matches on location
            let reasons = match_reasons(&jobs[4], &user("Stockholm"), &mut rng);
            assert_eq!(reasons.len(), 2);
            assert_eq!(reasons[0], "Nära din plats");
            assert!(FILLER_REASONS.contains(&reasons[1].as_str()));
        }
    }

    #[test]
    fn test_huge_jitter_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut jobs = sample_jobs();
        calculate_match_scores(&mut jobs, "Stockholm", &default_skills(), 1e308, &mut rng);
        calculate_match_scores(&mut jobs, "Stockholm", &default_skills(), f64::INFINITY, &mut rng);
        for j in &jobs {
            let base = base_score(j, "Stockholm", &default_skills());
            assert_eq!(j.match_score, base);
        }
        calculate_match_scores(&mut jobs, "Stockholm", &default_skills(), 1e308, &mut rng);
        for j in &jobs {
            let base = base_score(j, "Stockholm", &default_skills());
            assert!((j.match_score - base).abs() <= MAX_JITTER as i32);
        }
    }

    #[test]
    fn test_padded_location_is_trimmed() {
        let j = job("Stockholm, Vasastan", "Helgdag", "x", &[]);
        assert_eq!(base_score(&j, " Stockholm ", &[]), 70);
        let reasons = match_reasons(&j, &user("  stockholm "), &mut StdRng::seed_from_u64(2));
        assert_eq!(reasons[0], "Nära din plats");
    }

    #[test]
    fn test_stockholm_fallback_gives_no_location_reason() {
        let jobs = sample_jobs();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Painting job: scores the fallback bonus for Göteborg, nothing else
            let reasons = match_reasons(&jobs[4], &user("Göteborg"), &mut rng);
            assert_eq!(reasons.len(), 2);
            assert!(reasons.iter().all(|r| FILLER_REASONS.contains(&r.as_str())));
            assert_ne!(reasons[0], reasons[1]);
        }
    }

    #[test]
    fn test_empty_location_reason_falls_back_to_stockholm() {
        let jobs = sample_jobs();
        let mut rng = StdRng::seed_from_u64(4);
        let reasons = match_reasons(&jobs[4], &user(""), &mut rng);
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons[0], "Nära din plats");
        assert!(FILLER_REASONS.contains(&reasons[1].as_str()));

        let outside = job("Uppsala", "Helgdag", "x", &[]);
        let reasons = match_reasons(&outside, &user("   "), &mut rng);
        assert!(reasons.iter().all(|r| r != "Nära din plats"));
    }

    #[test]
    fn test_reasons_count_and_uniqueness() {
        let far_away = job("Kiruna", "Helgdag", "5000 kr", &["Måleri"]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut candidates = sample_jobs();
            candidates.push(far_away.clone());
            for j in &candidates {
                let reasons = match_reasons(j, &user("Umeå"), &mut rng);
                assert!((2..=3).contains(&reasons.len()));
                let unique: HashSet<&String> = reasons.iter().collect();
                assert_eq!(unique.len(), reasons.len());
            }
        }
    }

    #[test]
    fn test_match_score_color_bands() {
        assert_eq!(match_score_color(100), MatchColor::Green);
        assert_eq!(match_score_color(80), MatchColor::Green);
        assert_eq!(match_score_color(79), MatchColor::Orange);
        assert_eq!(match_score_color(60), MatchColor::Orange);
        assert_eq!(match_score_color(59), MatchColor::Red);
        assert_eq!(match_score_color(0), MatchColor::Red);
        assert_eq!(MatchColor::Green.hex(), "#2E8B57");
        assert_eq!(MatchColor::Orange.to_string(), "orange");
    }

    #[test]
    fn test_filter_by_match_keeps_order() {
        let mut jobs = sample_jobs();
        for (j, score) in jobs.iter_mut().zip([90, 40, 70, 69, 100, 71]) {
            j.match_score = score;
        }
        let ids: Vec<i64> = filter_by_match(&jobs, DEFAULT_MIN_SCORE).iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 3, 5, 6]);
        assert_eq!(filter_by_match(&jobs, 101).len(), 0);
        assert_eq!(filter_by_match(&jobs, 0).len(), jobs.len());
    }
}
