use serde::{Deserialize, Serialize};

/// Industries offered by the form's selection control.
pub const INDUSTRIES: [&str; 12] = [
    "Technology & Software",
    "E-commerce & Retail",
    "Healthcare & Wellness",
    "Education & EdTech",
    "Food & Beverage",
    "Manufacturing",
    "Agriculture & Agritech",
    "Finance & FinTech",
    "Real Estate",
    "Consulting & Services",
    "Travel & Hospitality",
    "Other",
];

/// States / regions of operation offered by the form's selection control.
pub const STATES: [&str; 30] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Other",
];

/// File types accepted by the attachments upload, matched case-insensitively
/// against the file name extension.
pub const ATTACHMENT_EXTENSIONS: [&str; 6] = ["pdf", "png", "jpg", "jpeg", "doc", "docx"];

/// One user's business-profile form, as submitted.
///
/// Every field defaults when absent from the request body so that missing
/// required fields surface as a validation failure rather than a
/// deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub business_name: Option<String>,
    /// Udyam registration number.
    pub registration_number: Option<String>,
    pub industry: String,
    pub state: String,
    pub business_goals: String,
    pub additional_info: Option<String>,
    pub include_pitch_deck: bool,
    /// Names of uploaded files. Contents are never retained.
    pub attachments: Vec<String>,
}

impl FormSubmission {
    pub fn business_name(&self) -> Option<&str> {
        non_blank(&self.business_name)
    }

    pub fn registration_number(&self) -> Option<&str> {
        non_blank(&self.registration_number)
    }

    pub fn additional_info(&self) -> Option<&str> {
        non_blank(&self.additional_info)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lists_have_expected_sizes() {
        assert_eq!(INDUSTRIES.len(), 12);
        assert_eq!(STATES.len(), 30);
        assert_eq!(INDUSTRIES.last(), Some(&"Other"));
        assert_eq!(STATES.last(), Some(&"Other"));
    }

    #[test]
    fn test_missing_json_fields_default() {
        let submission: FormSubmission =
            serde_json::from_str(r#"{"full_name":"Asha Rao"}"#).unwrap();
        assert_eq!(submission.full_name, "Asha Rao");
        assert!(submission.email.is_empty());
        assert!(!submission.include_pitch_deck);
        assert!(submission.attachments.is_empty());
    }

    #[test]
    fn test_blank_optional_fields_read_as_absent() {
        let submission = FormSubmission {
            business_name: Some("   ".to_string()),
            registration_number: Some(String::new()),
            additional_info: Some("DPIIT recognised".to_string()),
            ..Default::default()
        };
        assert_eq!(submission.business_name(), None);
        assert_eq!(submission.registration_number(), None);
        assert_eq!(submission.additional_info(), Some("DPIIT recognised"));
    }
}
