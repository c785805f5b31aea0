use std::path::PathBuf;

use serde_json::json;

use crate::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Attach local files to an `<input type="file">` remote object.
    pub async fn set_file_input_files(
        &self,
        object_id: &str,
        files: &[PathBuf],
    ) -> Result<(), CdpError> {
        let files: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
        self.call(
            "DOM.setFileInputFiles",
            Some(json!({ "files": files, "objectId": object_id })),
        )
        .await?;
        Ok(())
    }
}
