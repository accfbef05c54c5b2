use crate::controller::{ItemBaseController, ItemController, ItemEnvironment};
use crate::item::GalleryItem;

/// Controller for still images and custom content. Everything it does
/// lives in the base controller.
pub struct ImageItemController {
    base: ItemBaseController,
}

impl ImageItemController {
    pub fn new(index: usize, item: GalleryItem, environment: ItemEnvironment) -> Self {
        Self {
            base: ItemBaseController::new(index, item, environment),
        }
    }
}

impl ItemController for ImageItemController {
    fn base(&self) -> &ItemBaseController {
        &self.base
    }
}
