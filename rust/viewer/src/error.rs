// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading models or driving the render loop
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Failed to open model: {0}")]
    ModelOpen(String),

    #[error("Failed to enumerate model items: {0}")]
    Enumerate(String),

    #[error("Geometry for item #{id} failed: {message}")]
    ItemGeometry { id: u32, message: String },

    #[error("Frame scheduler error: {0}")]
    Scheduler(String),
}

impl Error {
    /// Create an item geometry error
    pub fn item(id: u32, message: impl Into<String>) -> Self {
        Error::ItemGeometry {
            id,
            message: message.into(),
        }
    }
}
