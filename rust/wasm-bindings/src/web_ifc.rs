// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! [`ModelParser`] over the web-ifc JavaScript library
//!
//! The host creates and initialises a web-ifc `IfcAPI` instance and hands it
//! to [`ViewerControls::load_model`](crate::ViewerControls::load_model).
//! Vertex and index buffers are passed through exactly as web-ifc returns
//! them.

use crate::utils::js_error_message;
use ifc_processor_viewer::{Error, GeometryItem, ModelHandle, ModelParser, Result};
use js_sys::{Float32Array, Uint32Array, Uint8Array};
use wasm_bindgen::prelude::*;

/// web-ifc type code of `IFCPRODUCT`
pub const IFC_PRODUCT: u32 = 4_208_778_838;

#[wasm_bindgen]
extern "C" {
    /// An initialised web-ifc `IfcAPI`
    #[wasm_bindgen(typescript_type = "IfcAPI")]
    #[derive(Clone)]
    pub type IfcApi;

    #[wasm_bindgen(method, catch, js_name = OpenModel)]
    fn open_model(this: &IfcApi, data: &Uint8Array) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = GetLineIDsWithType)]
    fn get_line_ids_with_type(
        this: &IfcApi,
        model_id: u32,
        type_code: u32,
    ) -> std::result::Result<IdVector, JsValue>;

    #[wasm_bindgen(method, catch, js_name = GetGeometry)]
    fn get_geometry(
        this: &IfcApi,
        model_id: u32,
        express_id: u32,
    ) -> std::result::Result<IfcGeometry, JsValue>;

    #[wasm_bindgen(method, catch, js_name = GetVertexArray)]
    fn get_vertex_array(this: &IfcApi, ptr: f64, size: f64) -> std::result::Result<Float32Array, JsValue>;

    #[wasm_bindgen(method, catch, js_name = GetIndexArray)]
    fn get_index_array(this: &IfcApi, ptr: f64, size: f64) -> std::result::Result<Uint32Array, JsValue>;

    #[wasm_bindgen(method, js_name = CloseModel)]
    fn close_model(this: &IfcApi, model_id: u32);

    type IdVector;

    #[wasm_bindgen(method)]
    fn size(this: &IdVector) -> u32;

    #[wasm_bindgen(method)]
    fn get(this: &IdVector, index: u32) -> u32;

    type IfcGeometry;

    #[wasm_bindgen(method, js_name = GetVertexData)]
    fn vertex_data(this: &IfcGeometry) -> f64;

    #[wasm_bindgen(method, js_name = GetVertexDataSize)]
    fn vertex_data_size(this: &IfcGeometry) -> f64;

    #[wasm_bindgen(method, js_name = GetIndexData)]
    fn index_data(this: &IfcGeometry) -> f64;

    #[wasm_bindgen(method, js_name = GetIndexDataSize)]
    fn index_data_size(this: &IfcGeometry) -> f64;
}

/// Model parser delegating to web-ifc
pub struct JsIfcParser {
    api: IfcApi,
}

impl JsIfcParser {
    pub fn new(api: IfcApi) -> Self {
        Self { api }
    }
}

impl ModelParser for JsIfcParser {
    fn open_model(&mut self, data: &[u8]) -> Result<ModelHandle> {
        let bytes = Uint8Array::from(data);
        let model_id = self
            .api
            .open_model(&bytes)
            .map_err(|e| Error::ModelOpen(js_error_message(&e)))?
            .as_f64()
            .filter(|id| *id >= 0.0)
            .ok_or_else(|| Error::ModelOpen("web-ifc returned no model id".into()))?;
        Ok(ModelHandle(model_id as u32))
    }

    fn product_ids(&self, handle: ModelHandle) -> Result<Vec<u32>> {
        let ids = self
            .api
            .get_line_ids_with_type(handle.0, IFC_PRODUCT)
            .map_err(|e| Error::Enumerate(js_error_message(&e)))?;
        Ok((0..ids.size()).map(|i| ids.get(i)).collect())
    }

    fn geometry(&self, handle: ModelHandle, express_id: u32) -> Result<GeometryItem> {
        let item_error = |e: JsValue| Error::item(express_id, js_error_message(&e));

        let geometry = self
            .api
            .get_geometry(handle.0, express_id)
            .map_err(item_error)?;

        let vertex_size = geometry.vertex_data_size();
        if vertex_size <= 0.0 {
            return Ok(GeometryItem::new(express_id, Vec::new(), Vec::new()));
        }

        let positions = self
            .api
            .get_vertex_array(geometry.vertex_data(), vertex_size)
            .map_err(item_error)?
            .to_vec();
        let indices = self
            .api
            .get_index_array(geometry.index_data(), geometry.index_data_size())
            .map_err(item_error)?
            .to_vec();

        Ok(GeometryItem::new(express_id, positions, indices))
    }

    fn close_model(&mut self, handle: ModelHandle) {
        self.api.close_model(handle.0);
    }
}
