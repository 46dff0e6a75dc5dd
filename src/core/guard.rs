// the safety boundary between model output and the database
// staged checks, each with its own rejection so tests can pin them down

use thiserror::Error;

// the only relations model-generated sql may touch; `orders` is admitted
// solely because the policy's own worked example joins it for the user filter
const ALLOWED_RELATIONS: [&str; 3] = ["product", "order_item", "orders"];

const MUTATION_KEYWORDS: [&str; 6] = ["insert", "update", "delete", "drop", "alter", "truncate"];

/// Query text that has passed every guard stage. The executor accepts
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery(String);

impl ValidatedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("only SELECT queries are allowed")]
    NotReadOnly,

    #[error("mutation keyword `{0}` is not allowed")]
    MutationKeyword(String),

    #[error("relation `{0}` is not accessible")]
    ForbiddenRelation(String),

    #[error("order query is missing a concrete user_id filter")]
    MissingUserFilter,
}

/// Validates one candidate query. Candidates come straight from the model,
/// including the degraded strings a failed provider call produces, so
/// rejecting garbage cheaply is part of the contract.
pub fn validate(candidate: &str) -> Result<ValidatedQuery, Rejection> {
    let lowered = candidate.trim().to_lowercase();

    if !lowered.starts_with("select") {
        return Err(Rejection::NotReadOnly);
    }

    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .collect();

    for keyword in MUTATION_KEYWORDS {
        if words.contains(&keyword) {
            return Err(Rejection::MutationKeyword(keyword.to_string()));
        }
    }

    let relations = referenced_relations(&lowered);
    for relation in &relations {
        if !ALLOWED_RELATIONS.contains(&relation.as_str()) {
            return Err(Rejection::ForbiddenRelation(relation.clone()));
        }
    }

    // order-scoped queries must be pinned to the caller; an unsubstituted
    // <USER_ID> placeholder counts as missing
    if relations.iter().any(|r| *r == "order_item" || *r == "orders") {
        let squashed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
        let has_filter =
            squashed.contains("user_id =") || squashed.contains("user_id=");
        if !has_filter || lowered.contains("<user_id>") {
            return Err(Rejection::MissingUserFilter);
        }
    }

    Ok(ValidatedQuery(candidate.trim().to_string()))
}

// clause keywords that end a FROM list
const FROM_LIST_END: [&str; 14] = [
    "where", "on", "group", "order", "limit", "having", "union", "inner", "left", "right",
    "full", "cross", "natural", "outer",
];

// every name introduced by FROM or JOIN, including each member of a
// comma-separated FROM list (aliases are skipped; a subquery surfaces the
// `select` keyword, which the whitelist then rejects)
fn referenced_relations(sql: &str) -> Vec<String> {
    // identifier tokens, with commas kept so FROM lists parse
    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();
    for c in sql.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if c == ',' {
                tokens.push(",".to_string());
            }
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }

    let mut relations = Vec::new();
    let mut expect_relation = false;
    let mut in_from_list = false;

    for token in &tokens {
        if token == "," {
            // a comma inside a FROM list introduces the next relation;
            // commas elsewhere (select list, IN lists) mean nothing here
            if in_from_list {
                expect_relation = true;
            }
            continue;
        }

        if expect_relation {
            relations.push(token.clone());
            expect_relation = false;
            continue;
        }

        match token.as_str() {
            "from" => {
                expect_relation = true;
                in_from_list = true;
            }
            "join" => {
                expect_relation = true;
                in_from_list = false;
            }
            t if FROM_LIST_END.contains(&t) => in_from_list = false,
            // anything else is an alias or expression text
            _ => {}
        }
    }

    relations
}
