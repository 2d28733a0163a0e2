#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;

pub const SEARCH_MARKER: &str = "[SEARCH]";
pub const PLAN_READY_PHRASE: &str = "here is your study plan";
pub const SEARCH_HINT: &str =
    "To use it, end your reply with [SEARCH] followed by the search query.";

/// A search the model asked for in the middle of a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// Exact text in the reply to replace with the search results.
    pub span: String,
    pub query: String,
}

impl SearchRequest {
    /// Replaces every repeat of the request's span, so the marker and query
    /// never survive into the displayed reply.
    pub fn substitute(&self, reply: &str, results: &str) -> String {
        return reply.replace(&self.span, &format!("Found resources: {results}"));
    }
}

/// Decides what a model reply asks the application to do. Kept apart from the
/// conversation so free text matching can be swapped for structured output.
pub trait ReplyClassifier {
    fn search_request(&self, reply: &str) -> Option<SearchRequest>;

    fn is_plan_ready(&self, reply: &str) -> bool;
}

pub type ClassifierBox = Box<dyn ReplyClassifier + Send + Sync>;

/// Looks for the literal `[SEARCH]` marker and the completion phrase.
#[derive(Default)]
pub struct MarkerClassifier {}

impl ReplyClassifier for MarkerClassifier {
    /// Only the first marker is honoured. Its query runs up to the next marker
    /// or the end of the reply.
    fn search_request(&self, reply: &str) -> Option<SearchRequest> {
        let start = reply.find(SEARCH_MARKER)?;
        let after = &reply[start + SEARCH_MARKER.len()..];
        let segment = match after.find(SEARCH_MARKER) {
            Some(end) => &after[..end],
            None => after,
        };

        let query = segment.trim();
        if query.is_empty() {
            return None;
        }

        let leading = segment.len() - segment.trim_start().len();
        return Some(SearchRequest {
            span: format!("{SEARCH_MARKER}{}", &segment[..leading + query.len()]),
            query: query.to_string(),
        });
    }

    fn is_plan_ready(&self, reply: &str) -> bool {
        return reply.to_lowercase().contains(PLAN_READY_PHRASE);
    }
}
