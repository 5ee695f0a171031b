//! The fixed set of images offered in the gallery, and the masks drawn on
//! each during this run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PolymaskError, Result};
use crate::registry::Mask;

/// One image the user can annotate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub id: String,
    pub title: String,
    pub path: PathBuf,
}

impl ImageSource {
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: path.into(),
        }
    }

    /// Decode the image file.
    pub fn load(&self) -> Result<image::DynamicImage> {
        Ok(image::open(&self.path)?)
    }
}

pub fn default_images() -> Vec<ImageSource> {
    vec![
        ImageSource::new("img0001", "Scattered remote buildings", "assets/image-1.png"),
        ImageSource::new("img002", "Suburban development", "assets/image-2.png"),
        ImageSource::new("img003", "Urban grid", "assets/image-3.png"),
    ]
}

/// Gallery entries plus the in-memory masks committed on each of them.
#[derive(Clone, Debug, Default)]
pub struct ImageCatalog {
    images: Vec<ImageSource>,
    annotations: HashMap<String, Vec<Mask>>,
}

impl ImageCatalog {
    pub fn new(images: Vec<ImageSource>) -> Self {
        Self {
            images,
            annotations: HashMap::new(),
        }
    }

    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    pub fn find(&self, id: &str) -> Result<&ImageSource> {
        self.images
            .iter()
            .find(|img| img.id == id)
            .ok_or_else(|| PolymaskError::UnknownImage { id: id.to_string() })
    }

    /// Add an image file to the gallery. The title is the file stem.
    pub fn add_image(&mut self, path: &Path) -> &ImageSource {
        let mut n = self.images.len() + 1;
        let id = loop {
            let candidate = format!("img{n:03}");
            if !self.images.iter().any(|img| img.id == candidate) {
                break candidate;
            }
            n += 1;
        };
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();
        info!("added {} as {id}", path.display());
        self.images.push(ImageSource::new(id, title, path));
        &self.images[self.images.len() - 1]
    }

    pub fn add_annotation(&mut self, id: &str, mask: Mask) -> Result<()> {
        self.find(id)?;
        self.annotations.entry(id.to_string()).or_default().push(mask);
        Ok(())
    }

    /// Replace the stored masks of an image.
    pub fn set_annotations(&mut self, id: &str, masks: Vec<Mask>) -> Result<()> {
        self.find(id)?;
        self.annotations.insert(id.to_string(), masks);
        Ok(())
    }

    pub fn annotations(&self, id: &str) -> &[Mask] {
        self.annotations.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
