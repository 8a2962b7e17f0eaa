// Prompt template for the analysis section of the business report.
// The system persona lives in llm_client::prompts.

use crate::report::submission::FormSubmission;

/// Analysis prompt template.
/// Replace: {owner}, {industry}, {state}, {business_name}, {business_goals},
///          {additional_info}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive Business Idea Generation & Validation Report for the following business:

Business Details:
- Owner: {owner}
- Industry: {industry}
- Location: {state}
- Business Name: {business_name}

Business Goals:
{business_goals}

Additional Information:
{additional_info}

Please provide a detailed report with the following sections:
1. Executive Summary
2. Market Analysis for {industry} in {state}
3. Business Viability Assessment
4. Target Audience Analysis
5. Competitive Landscape
6. Revenue Model Suggestions
7. Key Success Factors
8. Potential Challenges & Risks
9. Recommendations & Next Steps

Use clear headings (##), subheadings (###), bullet points, and professional language."#;

/// Fills the analysis template from a validated submission.
///
/// Placeholders are resolved in one pass over the template, so braces typed
/// into any field reach the prompt unchanged.
pub fn build_analysis_prompt(submission: &FormSubmission) -> String {
    fill_template(ANALYSIS_PROMPT_TEMPLATE, |key| match key {
        "owner" => Some(submission.full_name.as_str()),
        "industry" => Some(submission.industry.as_str()),
        "state" => Some(submission.state.as_str()),
        "business_name" => Some(submission.business_name().unwrap_or("Not specified")),
        "business_goals" => Some(submission.business_goals.as_str()),
        "additional_info" => Some(submission.additional_info().unwrap_or("None provided")),
        _ => None,
    })
}

/// Replaces each `{key}` in `template` for which `lookup` has a value.
/// Unknown keys stay as written. Substituted text is never rescanned.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let resolved = after
            .find('}')
            .and_then(|close| lookup(&after[..close]).map(|value| (close, value)));

        match resolved {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> FormSubmission {
        FormSubmission {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98450 00000".to_string(),
            industry: "Food & Beverage".to_string(),
            state: "Karnataka".to_string(),
            business_goals: "Open a sourdough bakery for {office} workers".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_includes_profile_fields() {
        let prompt = build_analysis_prompt(&submission());
        assert!(prompt.contains("- Owner: Asha Rao"));
        assert!(prompt.contains("- Industry: Food & Beverage"));
        assert!(prompt.contains("- Location: Karnataka"));
        assert!(prompt.contains("2. Market Analysis for Food & Beverage in Karnataka"));
        assert!(prompt.contains("9. Recommendations & Next Steps"));
    }

    #[test]
    fn test_absent_optional_fields_use_placeholders() {
        let prompt = build_analysis_prompt(&submission());
        assert!(prompt.contains("- Business Name: Not specified"));
        assert!(prompt.contains("Additional Information:\nNone provided"));
    }

    #[test]
    fn test_present_optional_fields_substituted() {
        let mut s = submission();
        s.business_name = Some("Crumb & Co".to_string());
        s.additional_info = Some("Seeking seed funding".to_string());
        let prompt = build_analysis_prompt(&s);
        assert!(prompt.contains("- Business Name: Crumb & Co"));
        assert!(prompt.contains("Additional Information:\nSeeking seed funding"));
    }

    #[test]
    fn test_user_braces_left_alone() {
        let prompt = build_analysis_prompt(&submission());
        assert!(prompt.contains("for {office} workers"));
        assert!(!prompt.contains("{owner}"));
    }

    #[test]
    fn test_placeholders_inside_fields_are_not_expanded() {
        let mut s = submission();
        s.full_name = "Team {state}".to_string();
        s.business_name = Some("{industry} Labs".to_string());
        s.additional_info = Some("{business_goals}".to_string());
        let prompt = build_analysis_prompt(&s);
        assert!(prompt.contains("- Owner: Team {state}"));
        assert!(prompt.contains("- Business Name: {industry} Labs"));
        assert!(prompt.contains("Additional Information:\n{business_goals}"));
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_unclosed_braces() {
        let filled = fill_template("{a} {b} {c", |k| (k == "a").then_some("A"));
        assert_eq!(filled, "A {b} {c");
    }
}
