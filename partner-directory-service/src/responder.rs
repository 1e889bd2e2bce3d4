//! Keyword-rule Q&A over a fixed set of canned answers.
//!
//! Rules are evaluated top to bottom and the first match wins, so relative
//! order is part of the contract: "how to add a partner" resolves via the
//! add-partner rule, not the usage walkthrough.

/// How a rule's keywords must appear in the lower-cased question.
enum Matcher {
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, question: &str) -> bool {
        match self {
            Matcher::AnyOf(keywords) => keywords.iter().any(|k| question.contains(k)),
            Matcher::AllOf(keywords) => keywords.iter().all(|k| question.contains(k)),
        }
    }
}

struct Rule {
    matcher: Matcher,
    answer: &'static str,
}

pub const PURPOSE_ANSWER: &str = "This program is designed to collect and store information about business and community partners for the Career and Technical Education Department at our school.";
pub const STORED_DATA_ANSWER: &str = "The program stores details such as the type of organization, available resources, and direct contact information for individuals associated with the partners.";
pub const ADD_PARTNER_ANSWER: &str = "To add partners, use the navigation system to move to the first page where you will find all the information on adding partners.";
pub const PARTNER_COUNT_ANSWER: &str = "The program includes information about at least 25 different partners, including various businesses and community organizations.";
pub const SEARCH_ANSWER: &str = "Users can search and filter partner information based on criteria such as organization type, available resources, or contact information.";
pub const USAGE_ANSWER: &str = "To operate the site, you can navigate through different sections using the dropdown menu on the top. You can add a new partner by filling out the form in the 'Add a New Partner' section. To search for partners, use the search bar in the 'Search/Filter' section. If you have any specific questions or need assistance, feel free to ask!";
pub const FALLBACK_ANSWER: &str = "I'm sorry, I don't have information on that topic. Please ask a different question.";

static RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::AnyOf(&["purpose"]),
        answer: PURPOSE_ANSWER,
    },
    Rule {
        matcher: Matcher::AnyOf(&["information", "details"]),
        answer: STORED_DATA_ANSWER,
    },
    Rule {
        matcher: Matcher::AllOf(&["add", "partner"]),
        answer: ADD_PARTNER_ANSWER,
    },
    Rule {
        matcher: Matcher::AnyOf(&["organizations"]),
        answer: PARTNER_COUNT_ANSWER,
    },
    Rule {
        matcher: Matcher::AnyOf(&["search", "filter", "partners"]),
        answer: SEARCH_ANSWER,
    },
    Rule {
        matcher: Matcher::AnyOf(&["how to", "operate", "use"]),
        answer: USAGE_ANSWER,
    },
];

/// Map a free-text question to one of the seven fixed answers.
/// Deterministic and total; no state, no side effects.
pub fn answer(question: &str) -> &'static str {
    let question = question.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&question))
        .map(|rule| rule.answer)
        .unwrap_or(FALLBACK_ANSWER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_rule_matches() {
        assert_eq!(answer("What is the purpose of this?"), PURPOSE_ANSWER);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(answer("PURPOSE?"), PURPOSE_ANSWER);
    }

    #[test]
    fn stored_data_rule_matches_either_keyword() {
        assert_eq!(answer("what information do you keep"), STORED_DATA_ANSWER);
        assert_eq!(answer("show me the details"), STORED_DATA_ANSWER);
    }

    #[test]
    fn add_partner_rule_needs_both_keywords() {
        assert_eq!(answer("can I add a partner here"), ADD_PARTNER_ANSWER);
        // "add" alone falls through every rule
        assert_eq!(answer("can I add something"), FALLBACK_ANSWER);
    }

    #[test]
    fn organizations_rule_matches() {
        assert_eq!(answer("how many organizations are there"), PARTNER_COUNT_ANSWER);
    }

    #[test]
    fn search_rule_matches_each_keyword() {
        assert_eq!(answer("can I search records"), SEARCH_ANSWER);
        assert_eq!(answer("can I filter records"), SEARCH_ANSWER);
        assert_eq!(answer("list partners"), SEARCH_ANSWER);
    }

    #[test]
    fn usage_rule_matches() {
        assert_eq!(answer("how to get around the site"), USAGE_ANSWER);
        assert_eq!(answer("operate this thing"), USAGE_ANSWER);
    }

    #[test]
    fn unknown_topic_falls_back() {
        assert_eq!(answer("banana"), FALLBACK_ANSWER);
    }

    #[test]
    fn add_partner_outranks_usage_walkthrough() {
        // Matches rule 3 ("add" + "partner") and rule 6 ("how to");
        // rule 3 is evaluated first
        assert_eq!(answer("how to add a partner"), ADD_PARTNER_ANSWER);
    }

    #[test]
    fn stored_data_outranks_add_partner() {
        // "information" is checked before "add" + "partner"
        assert_eq!(
            answer("information on how to add a partner"),
            STORED_DATA_ANSWER
        );
    }
}
