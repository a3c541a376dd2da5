//! NiFi delivery manifests
//!
//! A manifest describes one uploaded file for the downstream NiFi flow. The
//! JSON field names, their order and the two version constants are the wire
//! contract; `iterationL1..L4` encode a category-specific routing path.
//!
//! # Examples
//!
//! ```rust
//! use nifi_notify::app::{DeploymentContext, TriggerEvent, create_manifest};
//!
//! let event = TriggerEvent {
//!     name: "dd_OPN2102R_0103202021_16428.zip".to_string(),
//!     bucket: "ons-blaise-v2-nifi".to_string(),
//!     size: "20".to_string(),
//!     md5_hash: "0a14db6e48b947b57988a2f61469f228".to_string(),
//!     time_created: "0103202021_16428".to_string(),
//! };
//! let context = DeploymentContext::new("test", "DEV");
//!
//! let manifest = create_manifest(&event, &context)?;
//! assert_eq!(manifest.iteration_l1, "SYSTEMS");
//! assert_eq!(manifest.full_size_megabytes, "0.000020");
//! # Ok::<(), nifi_notify::errors::ManifestError>(())
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use tracing::debug;

use crate::app::classifier::{classify, Category};
use crate::app::codec::{decode_checksum, format_megabytes};
use crate::app::descriptor::FileDescriptor;
use crate::app::event::TriggerEvent;
use crate::constants::{manifest, routing};
use crate::errors::{ManifestResult, PublishError, PublishResult};

/// Deployment values that shape routing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeploymentContext {
    /// Environment name, e.g. `test`
    pub env: String,
    /// On-prem routing subfolder for default data delivery
    pub on_prem_subfolder: String,
}

impl DeploymentContext {
    pub fn new(env: impl Into<String>, on_prem_subfolder: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            on_prem_subfolder: on_prem_subfolder.into(),
        }
    }

    /// Manifest `sourceName` for this environment
    pub fn source_name(&self) -> String {
        format!("{}{}", manifest::SOURCE_NAME_PREFIX, self.env)
    }
}

/// One file described by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// `<object name>:<bucket>`
    pub name: String,
    pub size_bytes: String,
    /// Lower-case hex checksum
    #[serde(rename = "md5sum")]
    pub checksum_hex: String,
    pub relative_path: String,
}

/// Manifest published for a single upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub files: Vec<FileEntry>,
    pub source_name: String,
    pub manifest_created: String,
    pub full_size_megabytes: String,
    pub version: u32,
    pub schema_version: u32,
    pub description: String,
    pub dataset: String,
    pub sensitivity: String,
    pub iteration_l1: String,
    pub iteration_l2: String,
    pub iteration_l3: String,
    pub iteration_l4: String,
}

impl Manifest {
    /// Serialize to the JSON published to Pub/Sub
    pub fn to_json(&self) -> PublishResult<String> {
        String::from_utf8(self.to_bytes()?).map_err(|e| PublishError::Other(e.to_string()))
    }

    /// Serialize to indented JSON for display
    pub fn to_json_pretty(&self) -> PublishResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Payload bytes handed to the publisher
    ///
    /// The NiFi flow expects `", "` and `": "` separators with every
    /// non-ASCII character escaped as `\uXXXX`.
    pub fn to_bytes(&self) -> PublishResult<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, WireFormatter);
        self.serialize(&mut serializer)?;
        Ok(bytes)
    }

    pub fn first_file(&self) -> Option<&FileEntry> {
        self.files.first()
    }
}

/// JSON formatter for the manifest wire encoding
struct WireFormatter;

impl Formatter for WireFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Builds manifests for a deployment
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    context: DeploymentContext,
}

impl ManifestBuilder {
    pub fn new(context: DeploymentContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &DeploymentContext {
        &self.context
    }

    /// Build the manifest for an already classified file
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Codec` if the checksum is not base64 or the
    /// size is not an integer. No partial manifest is produced.
    pub fn build(&self, category: Category, file: &FileDescriptor) -> ManifestResult<Manifest> {
        let entry = FileEntry {
            name: file.qualified_name(),
            size_bytes: file.size_bytes().to_string(),
            checksum_hex: decode_checksum(file.checksum())?,
            relative_path: manifest::RELATIVE_PATH.to_string(),
        };
        let full_size_megabytes = format_megabytes(file.size_bytes())?;

        let survey_code = file.survey_code();
        let [iteration_l1, iteration_l2, iteration_l3, iteration_l4] =
            self.routing(category, file);

        Ok(Manifest {
            files: vec![entry],
            source_name: self.context.source_name(),
            manifest_created: file.created_at().to_string(),
            full_size_megabytes,
            version: manifest::VERSION,
            schema_version: manifest::SCHEMA_VERSION,
            description: category.description(&survey_code),
            dataset: category.dataset().to_string(),
            sensitivity: manifest::SENSITIVITY.to_string(),
            iteration_l1,
            iteration_l2,
            iteration_l3,
            iteration_l4,
        })
    }

    /// `iterationL1..L4` for a category
    fn routing(&self, category: Category, file: &FileDescriptor) -> [String; 4] {
        let env = &self.context.env;
        match category {
            Category::ManagementInformation => [
                format!("{}{}", routing::MI_ENVIRONMENT_PREFIX, env),
                file.survey_code(),
                file.instrument_code(),
                String::new(),
            ],
            Category::DataDeliveryDefault => [
                routing::SYSTEMS.to_string(),
                self.context.on_prem_subfolder.clone(),
                file.survey_code(),
                file.instrument_code(),
            ],
            Category::DataDeliveryLms => [
                routing::CLOUD.to_string(),
                env.clone(),
                file.instrument_code(),
                String::new(),
            ],
            Category::DataDeliveryFrs => [
                routing::INGRESS.to_string(),
                routing::SURVEY_DATA.to_string(),
                format!("{}{}", routing::FRS_ENVIRONMENT_PREFIX, env),
                file.instrument_code(),
            ],
        }
    }
}

/// Parse, classify and build the manifest for a trigger event
pub fn create_manifest(event: &TriggerEvent, context: &DeploymentContext) -> ManifestResult<Manifest> {
    let file = FileDescriptor::from_event(event);
    let category = classify(&file)?;
    debug!("Classified {} as {}", file.file_name(), category);

    ManifestBuilder::new(context.clone()).build(category, &file)
}
