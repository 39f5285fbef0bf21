// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loading a model into the scene and framing it

use crate::camera::{Camera, OrbitControls};
use crate::error::Result;
use crate::mesh::ModelMesh;
use crate::parser::{ModelHandle, ModelParser};
use crate::scene::Scene;

/// File extension accepted by the viewer and the upload service
pub const IFC_EXTENSION: &str = ".ifc";

/// Check whether a client file name carries the `.ifc` extension
/// (case-insensitive)
pub fn is_ifc_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(IFC_EXTENSION)
}

/// Outcome of a model load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Items added to the scene
    pub loaded: usize,
    /// Items whose geometry failed and were skipped
    pub skipped: usize,
    /// Items without vertex data
    pub empty: usize,
}

/// Replace the scene's model geometry with the model in `data` and fit the
/// camera to it.
///
/// Per-item geometry failures are logged and skipped. A file that cannot be
/// opened is reported without touching the scene or the camera. An
/// enumeration failure is returned after the camera has been fitted to
/// whatever geometry made it into the scene.
pub fn load_model<P, S>(
    parser: &mut P,
    scene: &mut S,
    camera: &mut Camera,
    controls: &OrbitControls,
    data: &[u8],
) -> Result<LoadReport>
where
    P: ModelParser,
    S: Scene + ?Sized,
{
    let handle = match parser.open_model(data) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, size = data.len(), "Failed to open model");
            return Err(e);
        }
    };

    scene.clear_model();

    let mut report = LoadReport::default();
    let result = add_model_items(parser, handle, scene, &mut report);
    parser.close_model(handle);

    controls.fit_to_bounds(camera, &scene.model_bounds());

    match result {
        Ok(()) => {
            tracing::info!(
                loaded = report.loaded,
                skipped = report.skipped,
                empty = report.empty,
                "Model loaded"
            );
            Ok(report)
        }
        Err(e) => {
            tracing::error!(error = %e, loaded = report.loaded, "Model enumeration failed");
            Err(e)
        }
    }
}

fn add_model_items<P, S>(
    parser: &P,
    handle: ModelHandle,
    scene: &mut S,
    report: &mut LoadReport,
) -> Result<()>
where
    P: ModelParser,
    S: Scene + ?Sized,
{
    for (express_id, geometry) in parser.iterate_geometry(handle)? {
        match geometry {
            Ok(item) if item.is_empty() => report.empty += 1,
            Ok(item) => {
                scene.add_mesh(ModelMesh::from_geometry(item));
                report.loaded += 1;
            }
            Err(e) => {
                tracing::warn!(express_id, error = %e, "Could not process item");
                report.skipped += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ifc_file_name() {
        assert!(is_ifc_file_name("model.ifc"));
        assert!(is_ifc_file_name("MODEL.IFC"));
        assert!(is_ifc_file_name("archive.v2.Ifc"));
        assert!(!is_ifc_file_name("model.txt"));
        assert!(!is_ifc_file_name("model.ifc.zip"));
        assert!(!is_ifc_file_name("ifc"));
    }
}
