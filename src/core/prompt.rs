// the classification prompt is the security policy, so it lives here as a
// versioned template instead of an inline literal at the call site

pub const POLICY_VERSION: &str = "2026-02";

// token the model must answer with when the input is not a store question
pub const NOT_APPLICABLE: &str = "No";

const TEMPLATE: &str = r#"This is user's original input: {message}

Your job is to check if the user's input is anyhow related to my ecommerce application (products or the user's own order items).

Rules:
1. If the input is NOT related to ecommerce, respond only with:
   No

2. If the input IS related, generate a SQL query based on this schema:
   - product(id, category, description, image_url, name, price)
   - [categories of products available - Electronics, Clothing, Gadgets]
   - order_item(id, quantity, order_id, product_id)

3. Query rules:
   - You can only access `product`, `order_item` tables.
   - Do not expose customer details.
   - User cannot insert, update, or delete any product or order_item data; the query should always be a DQL query (SELECT).
   - For order-related queries, always include a filter: `WHERE orders.user_id = {user_id}`.
   - Return only the SQL query, no explanations.

Examples:

User: Show all products under 12000
Response:
SELECT * FROM product WHERE price < 12000;

User: Show mobiles under 50000
Response:
SELECT * FROM product WHERE category = 'mobile' AND price < 50000;

User: Show my order items
Response:
SELECT p.*, oi.quantity
FROM order_item oi
JOIN orders o ON oi.order_id = o.id
JOIN product p ON oi.product_id = p.id
WHERE o.user_id = {user_id};

User: List all customers
Response:
No

User: Hi, how are you?
Response:
No"#;

/// Renders the classification prompt around one user message.
///
/// When the session carries a real caller id it replaces the `<USER_ID>`
/// placeholder, so order-scoped queries come back with a concrete filter
/// value. Without an id the placeholder survives and the guard rejects any
/// query that still contains it.
pub fn render(message: &str, user_id: Option<i64>) -> String {
    let user_id = user_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<USER_ID>".to_string());

    TEMPLATE
        .replace("{message}", message)
        .replace("{user_id}", &user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_user_message_verbatim() {
        let prompt = render("show mobiles under 50000", None);
        assert!(prompt.contains("This is user's original input: show mobiles under 50000"));
    }

    #[test]
    fn names_both_permitted_tables() {
        let prompt = render("x", None);
        assert!(prompt.contains("product(id, category, description, image_url, name, price)"));
        assert!(prompt.contains("order_item(id, quantity, order_id, product_id)"));
    }

    #[test]
    fn carries_negative_examples() {
        let prompt = render("x", None);
        assert!(prompt.contains("User: List all customers"));
        assert!(prompt.contains("User: Hi, how are you?"));
    }

    #[test]
    fn substitutes_known_caller_id() {
        let prompt = render("show my order items", Some(42));
        assert!(prompt.contains("WHERE orders.user_id = 42"));
        assert!(!prompt.contains("<USER_ID>"));
    }

    #[test]
    fn keeps_placeholder_without_caller_id() {
        let prompt = render("show my order items", None);
        assert!(prompt.contains("WHERE orders.user_id = <USER_ID>"));
    }
}
