//! Player animation table: one ordered frame list per `Status`.
//!
//! Frames live on disk as one folder per status under the character
//! directory, named after the status key:
//!   graphics/character/down/        walk cycle facing down
//!   graphics/character/down_idle/   idle facing down
//!   graphics/character/down_hoe/    hoe swing facing down
//! Files inside a folder play in filename order.

use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AssetConfig;
use crate::shared::*;

const FRAME_EXTENSIONS: [&str; 1] = ["png"];

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("no animation frames for status `{status}` in {}", .path.display())]
    MissingFrames { status: String, path: PathBuf },
    #[error("cannot read animation folder {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Anything that can turn a status folder into an ordered list of frames.
pub trait FrameSource {
    type Frame;

    /// Path of the folder for `status_key`, used in diagnostics.
    fn folder_path(&self, status_key: &str) -> PathBuf;

    fn import_folder(&mut self, status_key: &str) -> Result<Vec<Self::Frame>, AnimationError>;
}

/// Frames for every reachable status. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnimationTable<F> {
    frames: HashMap<Status, Vec<F>>,
}

impl<F> AnimationTable<F> {
    /// Import every status folder from `source`. Fails on the first
    /// status that is unreadable or has no frames.
    pub fn load<S>(source: &mut S) -> Result<Self, AnimationError>
    where
        S: FrameSource<Frame = F>,
    {
        let mut frames = HashMap::new();
        for status in Status::all() {
            let key = status.to_string();
            let list = source.import_folder(&key)?;
            if list.is_empty() {
                return Err(AnimationError::MissingFrames {
                    path: source.folder_path(&key),
                    status: key,
                });
            }
            frames.insert(status, list);
        }
        Ok(Self { frames })
    }

    /// Build from frames already in memory, with the same completeness check.
    pub fn from_frames(frames: HashMap<Status, Vec<F>>) -> Result<Self, AnimationError> {
        for status in Status::all() {
            if frames.get(&status).map_or(true, Vec::is_empty) {
                return Err(AnimationError::MissingFrames {
                    status: status.to_string(),
                    path: PathBuf::new(),
                });
            }
        }
        Ok(Self { frames })
    }

    /// Frames for `status`. Never empty for a table built by `load`/`from_frames`.
    pub fn frames(&self, status: Status) -> &[F] {
        self.frames.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First frame of `status`, the image shown when the status begins.
    pub fn first_frame(&self, status: Status) -> Result<&F, AnimationError> {
        self.frames(status)
            .first()
            .ok_or_else(|| AnimationError::MissingFrames {
                status: status.to_string(),
                path: PathBuf::new(),
            })
    }

    pub fn frame_count(&self, status: Status) -> usize {
        self.frames(status).len()
    }

    pub fn total_frames(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }
}

/// Image file names in `dir`, sorted by name.
pub fn sorted_frame_files(dir: &Path) -> Result<Vec<String>, AnimationError> {
    let read_err = |source: io::Error| AnimationError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_frame = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                FRAME_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if !is_frame {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Lists status folders on disk and hands each file to the asset server.
pub struct FolderImporter<'a> {
    asset_server: &'a AssetServer,
    /// Filesystem directory that Bevy treats as the asset root.
    fs_root: PathBuf,
    /// Character directory, relative to the asset root.
    character_dir: String,
}

impl<'a> FolderImporter<'a> {
    pub fn new(asset_server: &'a AssetServer, assets: &AssetConfig) -> Self {
        Self {
            asset_server,
            fs_root: FileAssetReader::get_base_path().join(&assets.root),
            character_dir: assets.character_dir.trim_end_matches('/').to_string(),
        }
    }

    fn asset_dir(&self, status_key: &str) -> String {
        format!("{}/{}", self.character_dir, status_key)
    }
}

impl FrameSource for FolderImporter<'_> {
    type Frame = Handle<Image>;

    fn folder_path(&self, status_key: &str) -> PathBuf {
        self.fs_root.join(self.asset_dir(status_key))
    }

    fn import_folder(&mut self, status_key: &str) -> Result<Vec<Handle<Image>>, AnimationError> {
        let asset_dir = self.asset_dir(status_key);
        let names = sorted_frame_files(&self.folder_path(status_key))?;
        debug!("[Player] {} frames in {}", names.len(), asset_dir);
        Ok(names
            .into_iter()
            .map(|name| self.asset_server.load(format!("{asset_dir}/{name}")))
            .collect())
    }
}
