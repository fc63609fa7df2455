//! Catalog of the named textures and sprite sheets the game draws with

use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    /// Sprite sheet with a named animation inside it
    SpriteSheet { animation: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    /// Verified on disk
    OnDisk,
    /// Registered without a backing file (headless runs)
    Virtual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: AssetKind,
    pub state: LoadState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("no asset named '{0}'")]
    Unknown(String),
    #[error("asset '{0}' has not been loaded yet")]
    NotLoaded(String),
    #[error("asset '{name}' not found at {path}")]
    Missing { name: String, path: PathBuf },
}

#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    entries: BTreeMap<String, AssetEntry>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the office and the ML lab draw
    pub fn with_default_manifest() -> Self {
        let mut catalog = Self::new();
        catalog
            .add_image("machine", "assets/img/machine.png")
            .add_image("inspectButton", "assets/img/question-mark-icon.png")
            .add_image("scanRay", "assets/img/scan-ray.png")
            .add_sheet(
                "rayAnim",
                "assets/spritesheets/machine-ray/ray_spritesheet.json",
                "ray",
            )
            .add_sheet(
                "dataServerRejected",
                "assets/spritesheets/data-server-rejected/data-server-rejected.json",
                "data-server-rejected",
            )
            .add_sheet(
                "dataServerAccepted",
                "assets/spritesheets/data-server-accepted/data-server-accepted.json",
                "data-server-accepted",
            )
            .add_image("doorAccepted", "assets/img/door-accepted.png")
            .add_sheet(
                "officeDoor",
                "assets/spritesheets/office-door/office-door.json",
                "door",
            )
            .add_image("doorRejected", "assets/img/door-rejected.png")
            .add_image("personBlue", "assets/img/person_blue.png")
            .add_image("personYellow", "assets/img/person_yellow.png")
            .add_image("desk", "assets/img/desk.png");
        catalog
    }

    pub fn add_image(&mut self, name: &str, path: &str) -> &mut Self {
        self.add(name, path, AssetKind::Image)
    }

    pub fn add_sheet(&mut self, name: &str, path: &str, animation: &str) -> &mut Self {
        self.add(
            name,
            path,
            AssetKind::SpriteSheet {
                animation: animation.to_string(),
            },
        )
    }

    fn add(&mut self, name: &str, path: &str, kind: AssetKind) -> &mut Self {
        self.entries.insert(
            name.to_string(),
            AssetEntry {
                name: name.to_string(),
                path: PathBuf::from(path),
                kind,
                state: LoadState::Pending,
            },
        );
        self
    }

    /// Resolve every registered asset
    ///
    /// With a `root`, each file must exist below it. Without one, entries are
    /// marked virtual so headless runs can still look them up.
    pub fn load(&mut self, root: Option<&Path>) -> Result<(), AssetError> {
        for entry in self.entries.values_mut() {
            entry.state = match root {
                Some(root) => {
                    let full = root.join(&entry.path);
                    if !full.exists() {
                        return Err(AssetError::Missing {
                            name: entry.name.clone(),
                            path: full,
                        });
                    }
                    LoadState::OnDisk
                }
                None => LoadState::Virtual,
            };
            debug!("Loaded asset {} ({:?})", entry.name, entry.state);
        }
        info!("Asset catalog ready with {} entries", self.entries.len());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&AssetEntry, AssetError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;
        if entry.state == LoadState::Pending {
            return Err(AssetError::NotLoaded(name.to_string()));
        }
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
