/// Pure functions for birthday message formatting (Discord-agnostic)
use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::utils::datetime::{Birthday, get_month_name};

/// Pick an announcement template uniformly at random and substitute the
/// member mention. The template set is validated as non-empty at startup.
pub fn compose_birthday_message<R: Rng>(rng: &mut R, templates: &[&str], mention: &str) -> String {
    let template = templates
        .choose(rng)
        .copied()
        .unwrap_or("Happy Birthday, {member}!");
    apply_mention_template(template, mention)
}

/// Replace the `{member}` placeholder in a message template
pub fn apply_mention_template(template: &str, mention: &str) -> String {
    template.replace("{member}", mention)
}

/// Build a single `name: date` line for the birthday list
pub fn build_list_entry(name: &str, date: &str) -> String {
    format!("{}: {}", name, date)
}

/// Build the full birthday list message from pre-sorted entries
pub fn build_list_message(entries: &[String]) -> String {
    format!("Registered birthdays:\n{}", entries.join("\n"))
}

/// Most common birth month over raw store values, as (month, count).
/// Ties resolve to the earliest month for deterministic output.
pub fn most_common_birth_month<'a, I>(dates: I) -> Option<(u32, usize)>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for raw in dates {
        if let Ok(birthday) = Birthday::parse(raw) {
            *counts.entry(birthday.month).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by_key(|&(month, count)| (count, std::cmp::Reverse(month)))
}

/// Build the `/birthdaystats` response
pub fn build_stats_message(total: usize, most_common: Option<(u32, usize)>) -> String {
    match most_common {
        Some((month, count)) => format!(
            "Birthday statistics:\nTotal birthdays registered: {}\nMost common birth month: {} ({} birthdays)",
            total,
            get_month_name(month),
            count
        ),
        None => "No birthdays have been registered yet.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_apply_mention_template() {
        assert_eq!(
            apply_mention_template("Happy Birthday, {member}! 🎉", "<@42>"),
            "Happy Birthday, <@42>! 🎉"
        );
        assert_eq!(apply_mention_template("no placeholder", "<@42>"), "no placeholder");
    }

    #[test]
    fn test_compose_is_deterministic_with_seeded_rng() {
        let templates = ["A {member}", "B {member}", "C {member}"];

        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        assert_eq!(
            compose_birthday_message(&mut first, &templates, "<@1>"),
            compose_birthday_message(&mut second, &templates, "<@1>")
        );
    }

    #[test]
    fn test_compose_always_substitutes_the_mention() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let message =
                compose_birthday_message(&mut rng, crate::constants::BIRTHDAY_MESSAGES, "<@99>");
            assert!(message.contains("<@99>"));
            assert!(!message.contains("{member}"));
        }
    }

    #[test]
    fn test_build_list_entry() {
        assert_eq!(build_list_entry("alice", "15/03"), "alice: 15/03");
        assert_eq!(
            build_list_entry("Unknown User (ID: 42)", "16/03/99"),
            "Unknown User (ID: 42): 16/03/99"
        );
    }

    #[test]
    fn test_build_list_message() {
        let entries = vec!["alice: 15/03".to_string(), "bob: 16/03/99".to_string()];
        assert_eq!(
            build_list_message(&entries),
            "Registered birthdays:\nalice: 15/03\nbob: 16/03/99"
        );
    }

    #[test]
    fn test_most_common_birth_month() {
        let dates = vec![
            "15/03".to_string(),
            "20/03/90".to_string(),
            "01/07".to_string(),
        ];
        assert_eq!(most_common_birth_month(&dates), Some((3, 2)));
    }

    #[test]
    fn test_most_common_birth_month_ignores_bad_entries() {
        let dates = vec!["15/03".to_string(), "garbage".to_string()];
        assert_eq!(most_common_birth_month(&dates), Some((3, 1)));
    }

    #[test]
    fn test_most_common_birth_month_tie_picks_earliest() {
        let dates = vec!["01/02".to_string(), "01/09".to_string()];
        assert_eq!(most_common_birth_month(&dates), Some((2, 1)));
    }

    #[test]
    fn test_most_common_birth_month_empty() {
        let dates: Vec<String> = vec![];
        assert_eq!(most_common_birth_month(&dates), None);
    }

    #[test]
    fn test_build_stats_message() {
        assert_eq!(
            build_stats_message(3, Some((3, 2))),
            "Birthday statistics:\nTotal birthdays registered: 3\nMost common birth month: March (2 birthdays)"
        );
        assert_eq!(
            build_stats_message(0, None),
            "No birthdays have been registered yet."
        );
    }
}
