// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Processor Viewer
//!
//! Viewer core for the IFC Processor: an orbit camera controller with
//! auto-framing, and the seams to the external libraries that decode IFC
//! files and draw the scene.
//!
//! - [`OrbitControls`] turns pointer drags and scroll input into camera
//!   motion around the origin and frames a [`BoundingBox`].
//! - [`ModelParser`] and [`Scene`] abstract the IFC library and renderer.
//! - [`load_model`] fills a scene from a model and fits the camera.
//! - [`RenderLoop`] drives per-frame drawing with an explicit cancel handle.
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_processor_viewer::{BoundingBox, Camera, OrbitControls, Point3};
//!
//! let mut camera = Camera::default();
//! let mut controls = OrbitControls::new();
//!
//! controls.begin_drag(100.0, 100.0);
//! controls.continue_drag(&mut camera, 120.0, 90.0);
//! controls.end_drag();
//!
//! let bounds = BoundingBox::from_corners(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
//! controls.fit_to_bounds(&mut camera, &bounds);
//! assert_eq!(camera.position, Point3::new(3.0, 3.0, 3.0));
//! ```

pub mod bounds;
pub mod camera;
pub mod error;
#[cfg(feature = "ifc-lite")]
pub mod ifc_lite;
pub mod loader;
pub mod mesh;
pub mod parser;
pub mod render_loop;
pub mod scene;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use bounds::BoundingBox;
pub use camera::{Camera, OrbitConfig, OrbitControls, Spherical};
pub use error::{Error, Result};
#[cfg(feature = "ifc-lite")]
pub use ifc_lite::IfcLiteParser;
pub use loader::{is_ifc_file_name, load_model, LoadReport};
pub use mesh::{GeometryItem, ModelMesh};
pub use parser::{GeometryIter, ModelHandle, ModelParser};
pub use render_loop::{FrameId, FrameScheduler, RenderLoop, RenderLoopHandle};
pub use scene::{MeshScene, Scene};
