// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Native [`ModelParser`] backed by the ifc-lite parser and geometry crates

use crate::error::{Error, Result};
use crate::mesh::GeometryItem;
use crate::parser::{ModelHandle, ModelParser};
use ifc_lite_core::{build_entity_index, EntityDecoder, EntityIndex, EntityScanner};
use ifc_lite_geometry::GeometryRouter;
use std::collections::HashMap;
use std::sync::Arc;

struct OpenModel {
    content: String,
    index: Arc<EntityIndex>,
    unit_scale: f64,
}

/// IFC decoding through ifc-lite
#[derive(Default)]
pub struct IfcLiteParser {
    models: HashMap<u32, OpenModel>,
    next_id: u32,
}

impl IfcLiteParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn model(&self, handle: ModelHandle) -> Result<&OpenModel> {
        self.models
            .get(&handle.0)
            .ok_or_else(|| Error::Enumerate(format!("Model {} is not open", handle.0)))
    }
}

impl ModelParser for IfcLiteParser {
    fn open_model(&mut self, data: &[u8]) -> Result<ModelHandle> {
        let content =
            String::from_utf8(data.to_vec()).map_err(|e| Error::ModelOpen(e.to_string()))?;

        let index = Arc::new(build_entity_index(&content));
        if index.is_empty() {
            return Err(Error::ModelOpen("No STEP entities found".into()));
        }

        let unit_scale = {
            let mut decoder = EntityDecoder::with_arc_index(&content, index.clone());
            GeometryRouter::with_units(&content, &mut decoder).unit_scale()
        };

        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(model_id = id, entities = index.len(), unit_scale, "Opened model");

        self.models.insert(
            id,
            OpenModel {
                content,
                index,
                unit_scale,
            },
        );
        Ok(ModelHandle(id))
    }

    fn product_ids(&self, handle: ModelHandle) -> Result<Vec<u32>> {
        let model = self.model(handle)?;
        let mut scanner = EntityScanner::new(&model.content);
        let mut ids = Vec::new();
        while let Some((id, type_name, _, _)) = scanner.next_entity() {
            if ifc_lite_core::has_geometry_by_name(type_name) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn geometry(&self, handle: ModelHandle, express_id: u32) -> Result<GeometryItem> {
        let model = self.model(handle)?;
        let mut decoder = EntityDecoder::with_arc_index(&model.content, model.index.clone());

        let entity = decoder
            .decode_by_id(express_id)
            .map_err(|e| Error::item(express_id, e.to_string()))?;

        let router = GeometryRouter::with_scale(model.unit_scale);
        let mesh = router
            .process_element(&entity, &mut decoder)
            .map_err(|e| Error::item(express_id, e.to_string()))?;

        Ok(GeometryItem::new(express_id, mesh.positions, mesh.indices))
    }

    fn close_model(&mut self, handle: ModelHandle) {
        self.models.remove(&handle.0);
    }
}
