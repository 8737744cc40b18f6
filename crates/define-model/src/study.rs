//! Document envelope: the ODM root and its single study.

use serde::{Deserialize, Serialize};

use crate::ids::Oid;
use crate::metadata::MetadataVersion;

/// Attributes of the `ODM` root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdmHeader {
    pub file_oid: Option<String>,
    pub file_type: Option<String>,
    pub odm_version: Option<String>,
    pub creation_date_time: Option<String>,
    pub originator: Option<String>,
    pub source_system: Option<String>,
    pub source_system_version: Option<String>,
    /// Define-XML 2.1 `def:Context` (`Submission` or `Other`).
    pub context: Option<String>,
}

/// `GlobalVariables` of a study.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalVariables {
    pub study_name: Option<String>,
    pub study_description: Option<String>,
    pub protocol_name: Option<String>,
}

/// A study and its optional metadata version.
#[derive(Debug, Clone, Serialize)]
pub struct Study {
    pub oid: Oid,
    pub global_variables: GlobalVariables,
    pub metadata_version: Option<MetadataVersion>,
}

/// A parsed Define-XML document.
#[derive(Debug, Clone, Serialize)]
pub struct DefineDocument {
    pub header: OdmHeader,
    pub study: Study,
}

impl DefineDocument {
    /// Shortcut to the study's metadata version.
    pub fn metadata_version(&self) -> Option<&MetadataVersion> {
        self.study.metadata_version.as_ref()
    }
}
