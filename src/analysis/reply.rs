//! Heuristic reply drafting.
//!
//! No LLM involved: runs the analyzer, then fills an intent-specific
//! template. The optional AI enhancer can supersede this with a richer
//! suggested response; this path is the always-available fallback.

use serde::{Deserialize, Serialize};

use super::analyzer::EmailAnalyzer;
use super::types::{AnalysisResult, CustomerIntent, EmailText};

/// Caller-supplied context for reply generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplyContext {
    /// Requested tone, echoed back in the result.
    pub tone: String,
    /// Subject of the email being replied to.
    pub original_subject: Option<String>,
}

impl Default for ReplyContext {
    fn default() -> Self {
        Self {
            tone: "professional".to_string(),
            original_subject: None,
        }
    }
}

/// A drafted reply plus the analysis that shaped it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftedReply {
    pub content: String,
    pub tone: String,
    pub suggested_subject: String,
    pub analysis: AnalysisResult,
}

/// Draft a reply to the given email body, choosing a template by intent.
pub fn generate_reply(
    analyzer: &EmailAnalyzer,
    body: &str,
    context: &ReplyContext,
) -> DraftedReply {
    let analysis = analyzer.analyze(&EmailText::from_body(body));

    let content = match analysis.customer_intent {
        CustomerIntent::Inquiry => inquiry_template(),
        CustomerIntent::Purchase => purchase_template(&analysis),
        CustomerIntent::Complaint => complaint_template(),
        _ => general_template(&analysis),
    };

    let suggested_subject = format!(
        "Re: {}",
        context.original_subject.as_deref().unwrap_or_default()
    );

    DraftedReply {
        content,
        tone: context.tone.clone(),
        suggested_subject,
        analysis,
    }
}

fn inquiry_template() -> String {
    "Hello,\n\n\
     Thank you for reaching out with your inquiry.\n\n\
     I'm happy to provide the following information regarding your question:\n\n\
     [fill in the specifics here]\n\n\
     If you need further detail or have any other questions, please don't \
     hesitate to get in touch.\n\n\
     Looking forward to your reply.\n\n\
     Best regards"
        .to_string()
}

fn purchase_template(analysis: &AnalysisResult) -> String {
    let key_lines: String = analysis
        .key_points
        .iter()
        .map(|kp| {
            let detail = kp
                .keyword
                .clone()
                .unwrap_or_else(|| kp.values.join(", "));
            format!("- {:?}: {detail}\n", kp.category).to_lowercase()
        })
        .collect();

    format!(
        "Hello,\n\n\
         Thank you for your purchase interest!\n\n\
         I've received your purchasing requirements — here is what I noted:\n\n\
         {key_lines}\n\
         We'll prepare a detailed quotation and product information for you \
         as soon as possible.\n\n\
         If you have any questions, please feel free to contact me.\n\n\
         Looking forward to working with you!\n\n\
         Best regards"
    )
}

fn complaint_template() -> String {
    "Hello,\n\n\
     We're very sorry for the inconvenience.\n\n\
     We've received your feedback and are treating it as a priority. Our team \
     is investigating and will provide a resolution as quickly as possible.\n\n\
     We will follow up within 24 hours with an update on progress.\n\n\
     Apologies again for the experience, and thank you for your patience.\n\n\
     Best regards"
        .to_string()
}

fn general_template(analysis: &AnalysisResult) -> String {
    format!(
        "Hello,\n\n\
         Thank you for your email.\n\n\
         I've received your message — next step on our side: {}.\n\n\
         If you have any questions or need further assistance, please feel \
         free to contact me.\n\n\
         Looking forward to your reply.\n\n\
         Best regards",
        analysis.suggested_action.to_lowercase()
    )
}
