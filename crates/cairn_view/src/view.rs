use cairn_core::prelude::*;
use serde::Serialize;
use tracing::warn;

pub const EMPTY_MESSAGE: &str = "No data assets found.";
pub const UPDATE_ACTION: &str = "Update Data Asset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Empty,
    Populated,
}

/// Navigation request handed to the action surface when an item is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub manifest_file: ManifestDocument,
    pub action: &'static str,
    #[serde(rename = "currentManifestFileCID")]
    pub current_manifest_file_cid: String,
    pub manifest_file_name: String,
    pub folder_cid: String,
}

impl UpdateRequest {
    pub fn for_document(document: &ManifestDocument) -> Self {
        Self {
            manifest_file: document.clone(),
            action: UPDATE_ACTION,
            current_manifest_file_cid: document.manifest_cid.clone(),
            manifest_file_name: document.manifest_file_name.clone(),
            folder_cid: document.folder_cid.clone(),
        }
    }
}

/// One selectable item of a populated view.
#[derive(Debug, Clone, Copy)]
pub struct AssetCard<'a> {
    pub position: usize,
    pub document: &'a ManifestDocument,
}

impl<'a> AssetCard<'a> {
    pub fn data_stream(&self) -> &'a DataStream {
        &self.document.data_stream
    }

    pub fn select(&self) -> UpdateRequest {
        UpdateRequest::for_document(self.document)
    }
}

/// What to draw. The busy indicator never appears together with items or
/// the empty message.
#[derive(Debug)]
pub enum Rendered<'a> {
    Busy,
    Cards(Vec<AssetCard<'a>>),
    Message(&'static str),
}

/// The materialized view of one mount.
#[derive(Debug, Clone)]
pub struct AssetView {
    state: ViewState,
    documents: Vec<ManifestDocument>,
}

impl Default for AssetView {
    fn default() -> Self {
        Self::loading()
    }
}

impl AssetView {
    pub fn loading() -> Self {
        Self {
            state: ViewState::Loading,
            documents: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn documents(&self) -> &[ManifestDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Leaves `Loading` with the accepted documents. Settling twice is ignored.
    pub fn settle(&mut self, documents: Vec<ManifestDocument>) {
        if self.state != ViewState::Loading {
            warn!("View already settled as {:?}, ignoring", self.state);
            return;
        }
        self.state = if documents.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        };
        self.documents = documents;
    }

    pub fn render(&self) -> Rendered<'_> {
        match self.state {
            ViewState::Loading => Rendered::Busy,
            ViewState::Empty => Rendered::Message(EMPTY_MESSAGE),
            ViewState::Populated => Rendered::Cards(
                self.documents
                    .iter()
                    .enumerate()
                    .map(|(position, document)| AssetCard { position, document })
                    .collect(),
            ),
        }
    }

    /// Starts the update action for the item at `position`.
    pub fn select(&self, position: usize) -> Option<UpdateRequest> {
        if self.state != ViewState::Populated {
            return None;
        }
        self.documents.get(position).map(UpdateRequest::for_document)
    }
}
