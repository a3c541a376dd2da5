//! Delivery category selection
//!
//! Classification looks at the file name only. The extension is validated
//! first, then an ordered rule table is scanned and the first matching rule
//! wins. `LM*` and `FRS*` survey codes are both data deliveries, so the
//! rule order is the tie-break.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::app::descriptor::FileDescriptor;
use crate::constants::{datasets, manifest, naming};
use crate::errors::{ManifestError, ManifestResult};

/// Downstream delivery category of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Management information extracts (`mi_*`)
    ManagementInformation,
    /// Data delivery routed to on-prem systems (`dd_*`)
    DataDeliveryDefault,
    /// Labour Market Survey family data delivery (`dd_LM*`)
    DataDeliveryLms,
    /// Family Resources Survey data delivery (`dd_FRS*`)
    DataDeliveryFrs,
}

impl Category {
    /// Dataset identifier written into the manifest
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::ManagementInformation => datasets::MANAGEMENT_INFORMATION,
            Self::DataDeliveryDefault => datasets::DATA_DELIVERY,
            Self::DataDeliveryLms => datasets::DATA_DELIVERY_LMS,
            Self::DataDeliveryFrs => datasets::DATA_DELIVERY_FRS,
        }
    }

    /// Human-readable manifest description
    pub fn description(&self, survey_code: &str) -> String {
        match self {
            Self::ManagementInformation => {
                "Management Information files uploaded to GCP bucket from Blaise5".to_string()
            }
            Self::DataDeliveryDefault | Self::DataDeliveryLms | Self::DataDeliveryFrs => format!(
                "Data Delivery files for {} uploaded to GCP bucket from Blaise5",
                survey_code
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ManagementInformation => "management-information",
            Self::DataDeliveryDefault => "data-delivery",
            Self::DataDeliveryLms => "data-delivery-lms",
            Self::DataDeliveryFrs => "data-delivery-frs",
        };
        f.write_str(name)
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Required category prefix
    pub prefix: &'static str,
    /// Required survey code prefix, if any
    pub survey_prefix: Option<&'static str>,
    /// Category selected when the rule matches
    pub category: Category,
}

impl Rule {
    /// Check whether a `(prefix, survey code)` pair satisfies this rule
    pub fn matches(&self, category_prefix: &str, survey_code: &str) -> bool {
        category_prefix == self.prefix
            && self
                .survey_prefix
                .map_or(true, |survey_prefix| survey_code.starts_with(survey_prefix))
    }
}

/// Classification rules in evaluation order; the first match wins
pub const RULES: &[Rule] = &[
    Rule {
        prefix: naming::MANAGEMENT_INFORMATION_PREFIX,
        survey_prefix: None,
        category: Category::ManagementInformation,
    },
    Rule {
        prefix: naming::DATA_DELIVERY_PREFIX,
        survey_prefix: Some(naming::LMS_SURVEY_PREFIX),
        category: Category::DataDeliveryLms,
    },
    Rule {
        prefix: naming::DATA_DELIVERY_PREFIX,
        survey_prefix: Some(naming::FRS_SURVEY_PREFIX),
        category: Category::DataDeliveryFrs,
    },
    Rule {
        prefix: naming::DATA_DELIVERY_PREFIX,
        survey_prefix: None,
        category: Category::DataDeliveryDefault,
    },
];

/// Select the first rule category for a `(prefix, survey code)` pair
pub fn match_rules(category_prefix: &str, survey_code: &str) -> Option<Category> {
    RULES
        .iter()
        .find(|rule| rule.matches(category_prefix, survey_code))
        .map(|rule| rule.category)
}

/// Classify an uploaded file into its delivery category
///
/// # Errors
///
/// - `ManifestError::InvalidFileExtension` if the extension is not supported;
///   this is checked before anything else
/// - `ManifestError::InvalidFileType` if no rule matches the category prefix
/// - `ManifestError::MissingSurveyCode` if a rule matched but the name has
///   no segment after its category prefix
pub fn classify(file: &FileDescriptor) -> ManifestResult<Category> {
    let extension = file.extension();
    if !manifest::SUPPORTED_EXTENSIONS.contains(&extension) {
        return Err(ManifestError::InvalidFileExtension {
            extension: extension.to_string(),
            supported: manifest::SUPPORTED_EXTENSIONS,
        });
    }

    let category_prefix = file.category_prefix();
    let survey_code = file.survey_code();

    let category = match_rules(&category_prefix, &survey_code).ok_or_else(|| {
        ManifestError::InvalidFileType {
            file_type: category_prefix.clone(),
            supported: manifest::SUPPORTED_FILE_TYPES,
        }
    })?;

    if !file.has_survey_segment() {
        return Err(ManifestError::MissingSurveyCode {
            file_name: file.file_name().to_string(),
        });
    }

    Ok(category)
}
