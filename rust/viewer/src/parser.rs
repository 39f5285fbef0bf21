// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model parser abstraction
//!
//! IFC decoding is provided by an external library. The viewer consumes it
//! through [`ModelParser`]: open a byte buffer into a handle, enumerate the
//! product items, and fetch each item's triangle geometry. A failure while
//! opening is fatal for the model; a failure for one item only means that
//! item is skipped.

use crate::error::Result;
use crate::mesh::GeometryItem;

/// Handle to a model opened by a [`ModelParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u32);

/// Capability provider for IFC decoding
pub trait ModelParser {
    /// Open a model from raw file bytes
    fn open_model(&mut self, data: &[u8]) -> Result<ModelHandle>;

    /// Express IDs of all product-type items in the model
    fn product_ids(&self, handle: ModelHandle) -> Result<Vec<u32>>;

    /// Triangle geometry for a single item
    fn geometry(&self, handle: ModelHandle, express_id: u32) -> Result<GeometryItem>;

    /// Release the model
    fn close_model(&mut self, handle: ModelHandle);

    /// Iterate over `(express_id, geometry)` for every product item
    fn iterate_geometry(&self, handle: ModelHandle) -> Result<GeometryIter<'_, Self>>
    where
        Self: Sized,
    {
        let ids = self.product_ids(handle)?;
        Ok(GeometryIter {
            parser: self,
            handle,
            ids: ids.into_iter(),
        })
    }
}

/// Iterator returned by [`ModelParser::iterate_geometry`]
pub struct GeometryIter<'a, P> {
    parser: &'a P,
    handle: ModelHandle,
    ids: std::vec::IntoIter<u32>,
}

impl<P: ModelParser> Iterator for GeometryIter<'_, P> {
    type Item = (u32, Result<GeometryItem>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some((id, self.parser.geometry(self.handle, id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
