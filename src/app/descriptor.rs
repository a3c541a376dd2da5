//! Filename parsing for uploaded files
//!
//! Upload names follow the Blaise naming convention
//! `<category>_<instrument>[_<segment>...].<ext>`, for example
//! `dd_OPN2102R_0103202021_16428.zip`. The parser only extracts syntax; it
//! never decides whether a name is acceptable.

use crate::app::event::TriggerEvent;
use crate::constants::manifest::SURVEY_CODE_LENGTH;

/// Structured description of one uploaded file
///
/// All derived fields are computed from `raw_name` on demand. The size and
/// checksum stay in their notification encodings until a manifest is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    raw_name: String,
    bucket: String,
    size_bytes: String,
    checksum: String,
    created_at: String,
}

impl FileDescriptor {
    /// Create a descriptor from the raw notification fields
    pub fn parse(
        name: impl Into<String>,
        bucket: impl Into<String>,
        size_bytes: impl Into<String>,
        checksum_b64: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            raw_name: name.into(),
            bucket: bucket.into(),
            size_bytes: size_bytes.into(),
            checksum: checksum_b64.into(),
            created_at: created_at.into(),
        }
    }

    /// Create a descriptor from a storage notification
    pub fn from_event(event: &TriggerEvent) -> Self {
        Self::parse(
            event.name.as_str(),
            event.bucket.as_str(),
            event.size.as_str(),
            event.md5_hash.as_str(),
            event.time_created.as_str(),
        )
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn size_bytes(&self) -> &str {
        &self.size_bytes
    }

    /// Base64 checksum as received
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Name used in manifest file entries: `<raw name>:<bucket>`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.raw_name, self.bucket)
    }

    /// File name without any `:bucket` suffix
    pub fn file_name(&self) -> &str {
        self.raw_name
            .split_once(':')
            .map_or(self.raw_name.as_str(), |(name, _)| name)
    }

    /// Dot-suffix of the file name including the dot, or `""` if there is none
    ///
    /// Only the final path component is considered, and a leading dot marks a
    /// hidden file rather than an extension.
    pub fn extension(&self) -> &str {
        let file_name = self.file_name();
        let base_start = file_name.rfind('/').map_or(0, |i| i + 1);
        match file_name[base_start..].rfind('.') {
            Some(dot) if dot > 0 => &file_name[base_start + dot..],
            _ => "",
        }
    }

    /// File name with the extension removed
    pub fn stem(&self) -> &str {
        let file_name = self.file_name();
        &file_name[..file_name.len() - self.extension().len()]
    }

    /// Leading name token (`dd`, `mi`, ...), lower-cased
    pub fn category_prefix(&self) -> String {
        self.segments()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// First three characters of the second segment, upper-cased
    ///
    /// Empty when the name has no second segment.
    pub fn survey_code(&self) -> String {
        self.segments()
            .nth(1)
            .map(|segment| {
                segment
                    .chars()
                    .take(SURVEY_CODE_LENGTH)
                    .collect::<String>()
                    .to_uppercase()
            })
            .unwrap_or_default()
    }

    /// Whether the name has a segment after its category prefix
    pub fn has_survey_segment(&self) -> bool {
        self.segments().nth(1).is_some()
    }

    /// Segments after the category prefix, upper-cased and joined by `_`
    ///
    /// Purely numeric segments are date or sequence stamps and are dropped.
    pub fn instrument_code(&self) -> String {
        self.segments()
            .skip(1)
            .filter(|segment| !is_numeric(segment))
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase()
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.stem().split('_')
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> FileDescriptor {
        FileDescriptor::parse(name, "ons-blaise-v2-nifi", "20", "", "")
    }

    #[test]
    fn test_from_event() {
        let event = TriggerEvent {
            name: "dd_OPN2102R_0103202021_16428.zip".to_string(),
            bucket: "ons-blaise-v2-nifi".to_string(),
            size: "20".to_string(),
            md5_hash: "0a14db6e48b947b57988a2f61469f228".to_string(),
            time_created: "0103202021_16428".to_string(),
        };

        let file = FileDescriptor::from_event(&event);
        assert_eq!(file.raw_name(), "dd_OPN2102R_0103202021_16428.zip");
        assert_eq!(file.bucket(), "ons-blaise-v2-nifi");
        assert_eq!(file.size_bytes(), "20");
        assert_eq!(file.checksum(), "0a14db6e48b947b57988a2f61469f228");
        assert_eq!(file.created_at(), "0103202021_16428");
        assert_eq!(
            file.qualified_name(),
            "dd_OPN2102R_0103202021_16428.zip:ons-blaise-v2-nifi"
        );
    }

    #[test]
    fn test_file_name_strips_bucket_suffix() {
        assert_eq!(descriptor("dd_file.zip:my-bucket-name").file_name(), "dd_file.zip");
        assert_eq!(descriptor("dd_file.zip").file_name(), "dd_file.zip");
    }

    #[test]
    fn test_extension() {
        let cases = [
            ("dd_file.zip", ".zip"),
            ("dd_file.zip:my-bucket-name", ".zip"),
            ("dd_opn2101a.avi", ".avi"),
            ("dd_file.tar.zip", ".zip"),
            ("dd_file", ""),
            (".zip", ""),
            ("folder.v2/dd_file", ""),
            ("folder/dd_file.zip", ".zip"),
        ];

        for (name, extension) in &cases {
            assert_eq!(descriptor(name).extension(), *extension, "for {}", name);
        }
    }

    #[test]
    fn test_category_prefix() {
        let cases = [
            ("dd_file.zip", "dd"),
            ("mi_file.zip", "mi"),
            ("DD_file.zip", "dd"),
            ("notMI.zip", "notmi"),
            ("mmmm_spicy.zip", "mmmm"),
        ];

        for (name, prefix) in &cases {
            assert_eq!(descriptor(name).category_prefix(), *prefix, "for {}", name);
        }
    }

    #[test]
    fn test_survey_code() {
        let cases = [
            ("dd_opn2101a.zip", "OPN"),
            ("dd_lms2102_a1.zip", "LMS"),
            ("dd_lms2102_bk1.zip", "LMS"),
            ("dd_lmc2102_bk1.zip", "LMC"),
            ("dd_lmb21021_bk2.zip", "LMB"),
            ("dd_frs2411a.zip", "FRS"),
            ("dd_ab.zip", "AB"),
            ("dd.zip", ""),
        ];

        for (name, survey) in &cases {
            assert_eq!(descriptor(name).survey_code(), *survey, "for {}", name);
        }
    }

    #[test]
    fn test_has_survey_segment() {
        assert!(descriptor("dd_opn2101a.zip").has_survey_segment());
        assert!(descriptor("mi_.zip").has_survey_segment());
        assert!(!descriptor("dd.zip").has_survey_segment());
        assert!(!descriptor("mi.zip:bucket").has_survey_segment());
    }

    #[test]
    fn test_instrument_code() {
        let cases = [
            ("dd_opn2101a.zip", "OPN2101A"),
            ("dd_lms2102_a1.zip", "LMS2102_A1"),
            ("dd_lms2102_bk1.zip", "LMS2102_BK1"),
            ("dd_lmc2102_bk1.zip", "LMC2102_BK1"),
            ("dd_lmb21021_bk2.zip", "LMB21021_BK2"),
            ("dd_frs2411a.zip", "FRS2411A"),
            ("dd_OPN2102R_0103202021_16428.zip", "OPN2102R"),
            ("mi_OPN2101A_0103202021_16428.zip:bucket", "OPN2101A"),
            ("dd.zip", ""),
        ];

        for (name, instrument) in &cases {
            assert_eq!(descriptor(name).instrument_code(), *instrument, "for {}", name);
        }
    }

    #[test]
    fn test_numeric_instrument_token_is_dropped() {
        // Numeric segments are always treated as stamps, even right after the prefix
        assert_eq!(descriptor("dd_2102_bk1.zip").instrument_code(), "BK1");
    }
}
