//! Input rules for the people requests

use conduit::{NumberRules, RuleSet, StringRules};

use super::commands::{NewPersonCommand, UpdatePersonCommand};
use super::queries::{GetPeoplePaginatedQuery, GetPersonByIdQuery};

pub const MIN_AGE: u32 = 18;
pub const MAX_PAGE_SIZE: usize = 50;

fn name_rules() -> StringRules {
    StringRules::new().not_empty().min_chars(2).max_chars(150)
}

fn email_rules() -> StringRules {
    StringRules::new().not_empty().email().max_chars(150)
}

pub fn new_person() -> RuleSet<NewPersonCommand> {
    RuleSet::new()
        .string("Name", |c: &NewPersonCommand| c.name.as_str(), name_rules())
        .string("Email", |c: &NewPersonCommand| c.email.as_str(), email_rules())
        .number("Age", |c: &NewPersonCommand| c.age, NumberRules::new().at_least(MIN_AGE))
}

pub fn update_person() -> RuleSet<UpdatePersonCommand> {
    RuleSet::new()
        .must("Id", |c: &UpdatePersonCommand| !c.id.is_nil(), "must not be empty")
        .string("Name", |c: &UpdatePersonCommand| c.name.as_str(), name_rules())
        .string("Email", |c: &UpdatePersonCommand| c.email.as_str(), email_rules())
        .number("Age", |c: &UpdatePersonCommand| c.age, NumberRules::new().at_least(MIN_AGE))
}

pub fn person_by_id() -> RuleSet<GetPersonByIdQuery> {
    RuleSet::new().must("Id", |q: &GetPersonByIdQuery| !q.id.is_nil(), "must not be empty")
}

pub fn people_paginated() -> RuleSet<GetPeoplePaginatedQuery> {
    RuleSet::new().number(
        "PageSize",
        |q: &GetPeoplePaginatedQuery| q.page.page_size,
        NumberRules::new().between(1, MAX_PAGE_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit::{PageRequest, Sensitive, Validator};

    fn command(name: &str, email: &str, age: u32) -> NewPersonCommand {
        NewPersonCommand {
            name: name.to_string(),
            email: email.to_string(),
            age,
            password: Sensitive::new("secret123".to_string()),
        }
    }

    #[test]
    fn test_valid_new_person() {
        assert!(new_person().validate(&command("Ana", "ana@example.com", 30)).is_empty());
    }

    #[test]
    fn test_empty_name_reports_only_first_rule() {
        let failures = new_person().validate(&command("", "ana@example.com", 30));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].property, "Name");
        assert_eq!(failures[0].message, "must not be empty");
    }

    #[test]
    fn test_underage_new_person() {
        let failures = new_person().validate(&command("Ana", "ana@example.com", 17));

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].property, "Age");
    }

    #[test]
    fn test_page_size_bounds() {
        let query = |size| GetPeoplePaginatedQuery {
            page: PageRequest::new(0, size),
            name: None,
            age: None,
        };

        assert_eq!(people_paginated().validate(&query(0)).len(), 1);
        assert!(people_paginated().validate(&query(10)).is_empty());
        assert_eq!(people_paginated().validate(&query(MAX_PAGE_SIZE + 1)).len(), 1);
    }
}
