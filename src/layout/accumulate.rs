use crate::script::is_line_break;
use crate::{FontConfig, MeasuredLayer, Px, Shaper};
use std::ops::ControlFlow;

/// Why the greedy scan over the input stopped
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every character fit
    Exhausted,
    /// A carriage return or line feed was reached
    LineBreak,
    /// The next character would have exceeded the width budget
    Overflow,
    /// The shaper could not render the run extended by the next character
    RenderFailed,
    /// The first character could not be measured and was taken on its own
    Forced,
}

/// The prefix of the input accepted by [`accumulate`]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AcceptedRun<'a> {
    pub text: &'a str,
    pub stop: StopReason,
}

/// The width of a layer once uniformly rescaled to `box_height`
pub fn scaled_width(layer: &MeasuredLayer, box_height: Px) -> Px {
    layer.width() * box_height.ratio_to(layer.height())
}

/// Accept the longest prefix of `text` whose rendering, rescaled to
/// `box_height`, is no wider than `target_width`.
///
/// Each candidate prefix is measured as a whole, so kerning and shaping of the
/// run are taken into account. The scan stops at the first line break. If the
/// shaper fails on a candidate the previously accepted prefix stands, unless
/// nothing was accepted yet, in which case the first character is taken alone
/// so that something can still be attempted.
pub fn accumulate<'a, S: Shaper + ?Sized>(
    text: &'a str,
    target_width: Px,
    box_height: Px,
    font: &FontConfig,
    shaper: &S,
) -> AcceptedRun<'a> {
    let scan = text
        .char_indices()
        .try_fold(0usize, |accepted, (start, ch)| {
            let stop = |reason: StopReason| -> ControlFlow<AcceptedRun<'a>, usize> {
                ControlFlow::Break(AcceptedRun {
                    text: &text[..accepted],
                    stop: reason,
                })
            };

            if is_line_break(ch) {
                return stop(StopReason::LineBreak);
            }

            let end = start + ch.len_utf8();
            let candidate = &text[..end];
            match shaper.render(candidate, font) {
                Ok(layer) if scaled_width(&layer, box_height) > target_width => {
                    stop(StopReason::Overflow)
                }
                Ok(_) => ControlFlow::Continue(end),
                Err(err) => {
                    log::warn!("failed to measure {candidate:?}: {err}");
                    if accepted > 0 {
                        stop(StopReason::RenderFailed)
                    } else {
                        ControlFlow::Break(AcceptedRun {
                            text: candidate,
                            stop: StopReason::Forced,
                        })
                    }
                }
            }
        });

    match scan {
        ControlFlow::Break(run) => run,
        ControlFlow::Continue(end) => AcceptedRun {
            text: &text[..end],
            stop: StopReason::Exhausted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;

    /// Every character is 10px wide and 20px tall
    fn monospace(text: &str, _: &FontConfig) -> Result<MeasuredLayer, RenderError> {
        Ok(MeasuredLayer::blank(
            Px(10.0 * text.chars().count() as f32),
            Px(20.0),
        ))
    }

    #[test]
    fn accepts_everything_that_fits() {
        let run = accumulate("Hello", Px(200.0), Px(20.0), &FontConfig::default(), &monospace);
        assert_eq!(run.text, "Hello");
        assert_eq!(run.stop, StopReason::Exhausted);
    }

    #[test]
    fn stops_at_line_breaks() {
        let font = FontConfig::default();
        let run = accumulate("Hello\nWorld", Px(200.0), Px(20.0), &font, &monospace);
        assert_eq!(run, AcceptedRun { text: "Hello", stop: StopReason::LineBreak });

        let run = accumulate("ab\r\ncd", Px(200.0), Px(20.0), &font, &monospace);
        assert_eq!(run.text, "ab");
    }

    #[test]
    fn exact_fit_is_accepted() {
        let run = accumulate("abcdef", Px(30.0), Px(20.0), &FontConfig::default(), &monospace);
        assert_eq!(run, AcceptedRun { text: "abc", stop: StopReason::Overflow });
    }

    #[test]
    fn widths_are_rescaled_to_the_box() {
        // shaper measures at 20px tall, box is 40px tall: each glyph counts as 20px
        let run = accumulate("abcdef", Px(50.0), Px(40.0), &FontConfig::default(), &monospace);
        assert_eq!(run.text, "ab");
    }

    #[test]
    fn zero_height_layers_are_not_rescaled() {
        let flat = |text: &str, _: &FontConfig| -> Result<MeasuredLayer, RenderError> {
            Ok(MeasuredLayer::blank(Px(10.0 * text.chars().count() as f32), Px(0.0)))
        };
        let run = accumulate("abcdef", Px(40.0), Px(20.0), &FontConfig::default(), &flat);
        assert_eq!(run.text, "abcd");
    }

    #[test]
    fn failure_after_progress_keeps_prefix() {
        let shaper = |text: &str, font: &FontConfig| {
            if text.contains('!') {
                Err(RenderError::MissingGlyph('!'))
            } else {
                monospace(text, font)
            }
        };
        let run = accumulate("ab!cd", Px(200.0), Px(20.0), &FontConfig::default(), &shaper);
        assert_eq!(run, AcceptedRun { text: "ab", stop: StopReason::RenderFailed });
    }

    #[test]
    fn failure_on_first_character_forces_it() {
        let shaper = |_: &str, _: &FontConfig| -> Result<MeasuredLayer, RenderError> {
            Err(RenderError::UnsupportedSequence("x".into()))
        };
        let run = accumulate("कि", Px(200.0), Px(20.0), &FontConfig::default(), &shaper);
        assert_eq!(run, AcceptedRun { text: "क", stop: StopReason::Forced });
    }

    #[test]
    fn empty_input_is_exhausted_immediately() {
        let run = accumulate("", Px(200.0), Px(20.0), &FontConfig::default(), &monospace);
        assert_eq!(run, AcceptedRun { text: "", stop: StopReason::Exhausted });
    }
}
