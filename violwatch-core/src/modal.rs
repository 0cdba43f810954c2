// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Violation detail modal.

/// What the modal shows for one violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    /// Full-size screenshot source
    pub image_src: String,
    /// Download link target; always the same path as the image
    pub download_href: String,
}

impl ModalContent {
    pub fn for_image(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            image_src: url.clone(),
            download_href: url,
        }
    }
}

/// A click closes the modal only when it landed on the backdrop itself, i.e.
/// the event target *is* the modal container and not one of its children.
///
/// `target` is `None` for synthetic events without a target.
///
/// ```
/// use violwatch_core::is_backdrop_click;
///
/// let container = "modal";
/// assert!(is_backdrop_click(Some(&"modal"), &container));
/// assert!(!is_backdrop_click(Some(&"modal-img"), &container));
/// assert!(!is_backdrop_click(None, &container));
/// ```
pub fn is_backdrop_click<T: PartialEq + ?Sized>(target: Option<&T>, container: &T) -> bool {
    target.is_some_and(|t| t == container)
}
