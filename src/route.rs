//! Navigation between the gallery and the annotate view.

use std::fmt;

use crate::error::{PolymaskError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `""`
    Gallery,
    /// `annotate/:id`
    Annotate { id: String },
}

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Ok(Route::Gallery);
        }
        match path.split_once('/') {
            Some(("annotate", id)) if !id.is_empty() && !id.contains('/') => Ok(Route::Annotate {
                id: id.to_string(),
            }),
            _ => Err(PolymaskError::UnknownRoute {
                path: path.to_string(),
            }),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Gallery => String::new(),
            Route::Annotate { id } => format!("annotate/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}
