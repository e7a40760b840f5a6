//! Library-wide constants.
//!
//! Centralizes the attribute names, class names and selectors shared between
//! the rendering layer and the interactive layer.

// ============================================================================
// Attributes
// ============================================================================

/// Marks the element acting as container for an instance. The value is unique per swap.
pub const ATTRIBUTE_CONTAINER: &str = "jtk-container";

/// Marks an element as managed (draggable node). The value is the managed id.
pub const ATTRIBUTE_MANAGED: &str = "jtk-managed";

/// Present with any value other than `"false"` to opt an element out of dragging.
pub const ATTRIBUTE_NOT_DRAGGABLE: &str = "jtk-not-draggable";

/// Marks an element as a group.
pub const ATTRIBUTE_GROUP: &str = "jtk-group";

/// Element id attribute used by [`crate::dom::Document::element_by_id`].
pub const ATTRIBUTE_ID: &str = "id";

// ============================================================================
// Classes
// ============================================================================

pub const CLASS_CONNECTOR: &str = "jtk-connector";
pub const CLASS_ENDPOINT: &str = "jtk-endpoint";
pub const CLASS_OVERLAY: &str = "jtk-overlay";

/// Applied to every element of the move set while a drag is in progress.
pub const CLASS_DRAG_ACTIVE: &str = "jtk-drag-active";

/// Applied to selected elements.
pub const CLASS_DRAG_SELECTED: &str = "jtk-drag-selected";

// ============================================================================
// Selectors
// ============================================================================

pub const SELECTOR_CONNECTOR: &str = ".jtk-connector";
pub const SELECTOR_ENDPOINT: &str = ".jtk-endpoint";
pub const SELECTOR_OVERLAY: &str = ".jtk-overlay";

/// Everything that follows the container when it is replaced.
pub const SELECTOR_CONTAINER_CONTENT: &str =
    ".jtk-connector, .jtk-endpoint, div.jtk-overlay, [jtk-managed]";

/// Everything removed by [`crate::Instance::reset`].
pub const SELECTOR_RESET_CONTENT: &str = "[jtk-managed], .jtk-endpoint, .jtk-connector, .jtk-overlay";

// ============================================================================
// Defaults
// ============================================================================

/// Default zoom factor
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Environment variable consulted by [`crate::logging::init`]
pub const LOG_ENV_VAR: &str = "PLUMBLINE_LOG";

/// Filter used when neither `PLUMBLINE_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";
