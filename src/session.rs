// per-message pipeline - one inbound frame in, exactly one reply out
//
// no conversation memory: every message is classified on its own, and every
// failure path still produces a reply so the socket never goes silent

use crate::core::{
    Classification, Db, Gemini, classify, extract_text, product_listing, validate,
};
use tracing::{info, warn};

pub async fn handle_message(
    gemini: &Gemini,
    db: &Db,
    user_id: Option<i64>,
    raw: &str,
) -> String {
    // normalized form is for classification only; the free-form path
    // relays the message as the user typed it
    let normalized = raw.trim().to_lowercase();

    match classify(gemini, &normalized, user_id).await {
        Classification::NotApplicable => {
            info!("free-form question, relaying to the model");
            let envelope = gemini.ask(raw.trim()).await;
            extract_text(&envelope)
        }

        Classification::Candidate(sql) => {
            info!(%sql, "model produced a candidate query");

            let query = match validate(&sql) {
                Ok(query) => query,
                Err(rejection) => {
                    warn!(%sql, %rejection, "guard rejected candidate");
                    return format!("blocked: {rejection}");
                }
            };

            match db.fetch_products(&query).await {
                Ok(products) => product_listing(&products),
                Err(e) => {
                    warn!(%e, "query execution failed");
                    format!("error: {e}")
                }
            }
        }
    }
}
