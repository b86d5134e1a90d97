//! Glyph path templates.
//!
//! Event decorations and data-element outlines are hand-authored SVG path
//! strings, each drawn in a fixed reference box. [`PathMap`] hands out the
//! raw path for a [`Glyph`] together with the transform that fits it to an
//! element's actual extent. Callers treat the path data as opaque.

use crate::geometry::Size;

/// The named glyphs the renderer composes onto shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    EventMessage,
    EventTimerFace,
    EventTimerHands,
    EventTimerTicks,
    EventConditional,
    EventSignal,
    EventEscalation,
    EventLink,
    EventError,
    EventCancel,
    EventCompensation,
    EventMultiple,
    EventParallelMultiple,
    DataObject,
    DataCollection,
    DataArrow,
    DataStore,
}

/// Lookup of raw glyph paths and their reference boxes.
#[derive(Debug, Default)]
pub struct PathMap;

impl PathMap {
    pub fn new() -> Self {
        Self
    }

    /// Returns the raw path data for a glyph, drawn in its reference box.
    pub fn raw_path(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::EventMessage => "M 7 12 L 29 12 L 29 24 L 7 24 Z M 7 12 L 18 19.4 L 29 12",
            Glyph::EventTimerFace => "M 18 7 A 11 11 0 1 1 17.99 7 Z",
            Glyph::EventTimerHands => "M 18 18 L 18 10.6 M 18 18 L 22.8 20.8",
            Glyph::EventTimerTicks => {
                "M 18 7.4 L 18 9.4 M 28.6 18 L 26.6 18 M 18 28.6 L 18 26.6 M 7.4 18 L 9.4 18 \
                 M 23.3 8.8 L 22.3 10.5 M 27.2 12.7 L 25.5 13.7 M 27.2 23.3 L 25.5 22.3 \
                 M 23.3 27.2 L 22.3 25.5 M 12.7 27.2 L 13.7 25.5 M 8.8 23.3 L 10.5 22.3 \
                 M 8.8 12.7 L 10.5 13.7 M 12.7 8.8 L 13.7 10.5"
            }
            Glyph::EventConditional => {
                "M 10 8 L 26 8 L 26 28 L 10 28 Z M 12.5 11.5 L 23.5 11.5 M 12.5 15.5 L 23.5 15.5 \
                 M 12.5 19.5 L 23.5 19.5 M 12.5 23.5 L 23.5 23.5"
            }
            Glyph::EventSignal => "M 18 8.2 L 27.8 26.2 L 8.2 26.2 Z",
            Glyph::EventEscalation => "M 18 7.6 L 26 26.4 L 18 19.2 L 10 26.4 Z",
            Glyph::EventLink => "M 8.6 13.4 L 19 13.4 L 19 8.2 L 28.8 18 L 19 27.8 L 19 22.6 L 8.6 22.6 Z",
            Glyph::EventError => "M 10.2 26.6 L 14.8 9.8 L 20.8 18.6 L 25.8 9.4 L 21.8 26.2 L 15.8 17.6 Z",
            Glyph::EventCancel => {
                "M 11 8.6 L 18 15.6 L 25 8.6 L 27.4 11 L 20.4 18 L 27.4 25 L 25 27.4 L 18 20.4 \
                 L 11 27.4 L 8.6 25 L 15.6 18 L 8.6 11 Z"
            }
            Glyph::EventCompensation => "M 17 9.4 L 17 26.6 L 8.4 18 Z M 27.2 9.4 L 27.2 26.6 L 18.6 18 Z",
            Glyph::EventMultiple => "M 18 7.2 L 28.6 14.9 L 24.5 27.4 L 11.5 27.4 L 7.4 14.9 Z",
            Glyph::EventParallelMultiple => {
                "M 15.6 8 L 20.4 8 L 20.4 15.6 L 28 15.6 L 28 20.4 L 20.4 20.4 L 20.4 28 \
                 L 15.6 28 L 15.6 20.4 L 8 20.4 L 8 15.6 L 15.6 15.6 Z"
            }
            Glyph::DataObject => "m 0 0 40 0 10 10 0 50 -50 0 0 -60 m 40 0 0 10 10 0",
            Glyph::DataCollection => {
                "M 0 0 l 0 15 l 1 0 l 0 -15 z M 6 0 l 0 15 l 1 0 l 0 -15 z M 12 0 l 0 15 l 1 0 l 0 -15 z"
            }
            Glyph::DataArrow => "m -1.5357 2.8074 9 0 0 -3 5 5 -5 5 0 -3 -9 0 z",
            Glyph::DataStore => {
                "m 59.5253 15.2984 c 0 1.9490 -3.4477 6.4288 -29.7791 6.4288 -26.3304 0 \
                 -29.2715 -4.5986 -29.2715 -6.3336 m 0 -4.5633 c 0 1.7360 2.9411 6.3346 \
                 29.2715 6.3346 26.3314 0 29.7791 -4.4799 29.7791 -6.4288 M 0.4747 6.2670 c \
                 0 2.3062 2.9411 6.3346 29.2715 6.3346 26.3314 0 29.7791 -3.8390 29.7791 \
                 -6.4298 m 0 9.81 V 10.9265 M 0.4975 6.1728 V 10.9265 M 59.5253 10.7361 v \
                 4.7536 M 0.4975 10.7361 v 4.7536 M 29.7224 0.5507 c 19.0607 0 29.8029 \
                 2.9931 29.8029 5.6221 0 2.6280 0 44.2549 0 47.3441 0 3.0893 -15.6386 \
                 6.0844 -29.8944 6.0844 -14.2557 0 -29.1563 -2.8999 -29.1563 -6.1805 0 \
                 -3.2797 0 -44.8751 0 -47.1538 0 -2.2787 10.1880 -5.7163 29.2477 -5.7163 z"
            }
        }
    }

    /// Returns the box a glyph's raw path was authored in.
    pub fn reference_box(&self, glyph: Glyph) -> Size {
        match glyph {
            Glyph::DataObject | Glyph::DataArrow | Glyph::DataCollection => Size::new(50.0, 60.0),
            Glyph::DataStore => Size::new(60.0, 61.0),
            _ => Size::new(36.0, 36.0),
        }
    }

    /// Computes the transform fitting a glyph's reference box to `size`.
    ///
    /// Returns `None` when the element already matches the reference box,
    /// so the common case emits no transform attribute at all.
    pub fn fit_transform(&self, glyph: Glyph, size: Size) -> Option<String> {
        let reference = self.reference_box(glyph);
        let sx = size.width() / reference.width();
        let sy = size.height() / reference.height();
        if (sx - 1.0).abs() < 1e-9 && (sy - 1.0).abs() < 1e-9 {
            return None;
        }
        Some(format!("scale({sx} {sy})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_event_glyphs_share_reference_box() {
        let map = PathMap::new();
        let reference = map.reference_box(Glyph::EventMessage);
        assert!(approx_eq!(f64, reference.width(), 36.0));
        assert!(approx_eq!(f64, reference.height(), 36.0));
    }

    #[test]
    fn test_matching_size_needs_no_transform() {
        let map = PathMap::new();
        assert!(
            map.fit_transform(Glyph::EventSignal, Size::new(36.0, 36.0))
                .is_none()
        );
    }

    #[test]
    fn test_larger_event_scales_up() {
        let map = PathMap::new();
        let transform = map
            .fit_transform(Glyph::EventSignal, Size::new(72.0, 36.0))
            .unwrap();
        assert_eq!(transform, "scale(2 1)");
    }

    #[test]
    fn test_every_glyph_has_path_data() {
        let map = PathMap::new();
        for glyph in [
            Glyph::EventMessage,
            Glyph::EventTimerFace,
            Glyph::EventTimerHands,
            Glyph::EventTimerTicks,
            Glyph::EventConditional,
            Glyph::EventSignal,
            Glyph::EventEscalation,
            Glyph::EventLink,
            Glyph::EventError,
            Glyph::EventCancel,
            Glyph::EventCompensation,
            Glyph::EventMultiple,
            Glyph::EventParallelMultiple,
            Glyph::DataObject,
            Glyph::DataCollection,
            Glyph::DataArrow,
            Glyph::DataStore,
        ] {
            assert!(map.raw_path(glyph).starts_with(['M', 'm']));
        }
    }
}
