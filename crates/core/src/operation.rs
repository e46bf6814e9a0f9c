//! Resource and operation selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Assistant,
    File,
    ContextSnippet,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Self::Assistant, Self::File, Self::ContextSnippet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::File => "file",
            Self::ContextSnippet => "contextSnippet",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Assistant => "Assistant",
            Self::File => "File",
            Self::ContextSnippet => "Context Snippet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    ListAssistants,
    ListFiles,
    UploadFile,
    UpdateFile,
    DeleteFile,
    GetContextSnippets,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListAssistants => "listAssistants",
            Self::ListFiles => "listFiles",
            Self::UploadFile => "uploadFile",
            Self::UpdateFile => "updateFile",
            Self::DeleteFile => "deleteFile",
            Self::GetContextSnippets => "getContextSnippets",
        }
    }

    /// The resource this operation is offered under.
    pub fn resource(&self) -> Resource {
        match self {
            Self::ListAssistants => Resource::Assistant,
            Self::ListFiles | Self::UploadFile | Self::UpdateFile | Self::DeleteFile => {
                Resource::File
            }
            Self::GetContextSnippets => Resource::ContextSnippet,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listAssistants" => Ok(Self::ListAssistants),
            "listFiles" => Ok(Self::ListFiles),
            "uploadFile" => Ok(Self::UploadFile),
            "updateFile" => Ok(Self::UpdateFile),
            "deleteFile" => Ok(Self::DeleteFile),
            "getContextSnippets" => Ok(Self::GetContextSnippets),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_parse_from_host_strings() {
        assert_eq!("contextSnippet".parse::<Resource>().unwrap(), Resource::ContextSnippet);
        assert_eq!("deleteFile".parse::<Operation>().unwrap(), Operation::DeleteFile);
        assert!("folder".parse::<Resource>().is_err());
    }

    #[test]
    fn operations_belong_to_one_resource() {
        assert_eq!(Operation::UpdateFile.resource(), Resource::File);
        assert_eq!(Operation::ListAssistants.resource(), Resource::Assistant);
    }
}
