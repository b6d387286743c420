//! Card placement within the container

use cardstack_core::{Anchor, CardSize, CardStyle, EdgeInsets, Rect, ResolvedInsets, Size};

use crate::host::CardContent;

/// Card frame and content area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    /// Card frame in container coordinates
    pub frame: Rect,
    /// Content area in card coordinates
    pub content_frame: Rect,
}

/// Place a card of `card_size` against its anchor
///
/// Top and bottom cards span the width between the left and right insets;
/// left and right cards span the height. A centered card ignores insets.
pub fn card_frame(anchor: Anchor, container: Rect, card_insets: EdgeInsets, card_size: Size) -> Rect {
    let area = container.inset_by(card_insets);
    match anchor {
        Anchor::Top => Rect::new(area.x(), area.y(), area.width(), card_size.height),
        Anchor::Bottom => Rect::new(
            area.x(),
            area.max_y() - card_size.height,
            area.width(),
            card_size.height,
        ),
        Anchor::Left => Rect::new(area.x(), area.y(), card_size.width, area.height()),
        Anchor::Right => Rect::new(
            area.max_x() - card_size.width,
            area.y(),
            card_size.width,
            area.height(),
        ),
        Anchor::Center => {
            let center = container.center();
            Rect::new(
                center.x - card_size.width / 2.0,
                center.y - card_size.height / 2.0,
                card_size.width,
                card_size.height,
            )
        }
    }
}

/// Content size after applying the style's sizing mode
fn constrain(anchor: Anchor, mode: CardSize, preferred: Size) -> Size {
    match mode {
        CardSize::Content => preferred,
        CardSize::Fixed(value) => match anchor {
            Anchor::Top | Anchor::Bottom => Size::new(preferred.width, value),
            Anchor::Left | Anchor::Right => Size::new(value, preferred.height),
            Anchor::Center => Size::new(value, value),
        },
        CardSize::FixedSize(size) => match anchor {
            Anchor::Top | Anchor::Bottom => Size::new(preferred.width, size.height),
            Anchor::Left | Anchor::Right => Size::new(size.width, preferred.height),
            Anchor::Center => size,
        },
    }
}

/// Lay out a card for `style` in `container`
pub fn layout_card(
    style: &CardStyle,
    container: Rect,
    insets: &ResolvedInsets,
    content: &dyn CardContent,
) -> CardLayout {
    let anchor = style.anchor;
    let area = if anchor == Anchor::Center {
        container
    } else {
        container.inset_by(insets.card)
    };

    let padding = insets.content;
    let available = Size::new(
        (area.width() - padding.horizontal()).max(0.0),
        (area.height() - padding.vertical()).max(0.0),
    );
    let content_size = constrain(anchor, style.size, content.preferred_size(available));

    let card_size = Size::new(
        (content_size.width + padding.horizontal()).min(area.width()),
        (content_size.height + padding.vertical()).min(area.height()),
    );

    let frame = card_frame(anchor, container, insets.card, card_size);
    let content_frame = frame.size.to_rect().inset_by(padding);

    CardLayout {
        frame,
        content_frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstack_core::{insets, presets, Edge};

    const SCREEN: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

    #[test]
    fn test_bottom_card_hugs_bottom_inset() {
        let frame = card_frame(
            Anchor::Bottom,
            SCREEN,
            EdgeInsets::new(0.0, 12.0, 34.0, 12.0),
            Size::new(0.0, 200.0),
        );
        assert_eq!(frame, Rect::new(12.0, 610.0, 366.0, 200.0));
    }

    #[test]
    fn test_right_card_spans_height() {
        let frame = card_frame(
            Anchor::Right,
            SCREEN,
            EdgeInsets::new(47.0, 0.0, 34.0, 0.0),
            Size::new(300.0, 0.0),
        );
        assert_eq!(frame, Rect::new(90.0, 47.0, 300.0, 763.0));
    }

    #[test]
    fn test_center_ignores_insets() {
        let frame = card_frame(
            Anchor::Center,
            SCREEN,
            EdgeInsets::uniform(40.0),
            Size::new(270.0, 150.0),
        );
        assert_eq!(frame, Rect::new(60.0, 347.0, 270.0, 150.0));
    }

    #[test]
    fn test_content_padding_grows_card() {
        let style = presets::full_bleed(|_| {});
        let resolved = insets::resolve(&style, EdgeInsets::new(47.0, 0.0, 34.0, 0.0));
        let layout = layout_card(&style, SCREEN, &resolved, &Size::new(390.0, 200.0));

        assert_eq!(layout.frame, Rect::new(0.0, 610.0, 390.0, 234.0));
        assert_eq!(layout.content_frame, Rect::new(0.0, 0.0, 390.0, 200.0));
    }

    #[test]
    fn test_fixed_size_on_anchor_axis() {
        let style = presets::default(|make| {
            make.anchor(Anchor::Left)
                .size(CardSize::Fixed(280.0))
                .safe_area_avoidance(cardstack_core::SafeAreaAvoidance::None, &Edge::ALL);
        });
        let resolved = insets::resolve(&style, EdgeInsets::ZERO);
        let layout = layout_card(&style, SCREEN, &resolved, &Size::new(100.0, 100.0));
        assert_eq!(layout.frame, Rect::new(0.0, 0.0, 280.0, 844.0));
    }
}
