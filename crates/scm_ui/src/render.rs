//! Text drawing.
//!
//! [`TextDraw`] holds the producers for one text element. Each
//! [`TextDraw::draw`] samples them into a [`TextFrame`] and writes it into
//! the next slot of the host's [`DrawRing`].

use bytemuck::{Pod, Zeroable};
use scm_core::{CoreError, RawMemory};
use scm_shared::{BuildLayout, ScreenLayout, Vec2};

use crate::error::UiError;
use crate::layout::{parse_ratio, Align, Dimension, TextCase};
use crate::producer::{AxisProducer, ColorProducer, OpacityProducer, VecProducer};
use crate::style::{ColorSpec, Palette, Rgba};

/// Drawable slot as the host renderer reads it. The UTF-16 text follows
/// at [`DrawSlot::TEXT_OFFSET`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawSlot {
    /// Text scale (x, y).
    pub scale: [f32; 2],
    /// Foreground colour (RGBA).
    pub color: [u8; 4],
    /// Left-justify flag.
    pub justify: u8,
    /// Right-justify flag.
    pub right_justify: u8,
    /// Centre flag.
    pub centered: u8,
    /// Background enable flag.
    pub background: u8,
    /// Wrap width for left/right aligned text.
    pub wrap_x: f32,
    /// Wrap width for centered text.
    pub centre_size: f32,
    /// Background colour (RGBA).
    pub background_color: [u8; 4],
    /// Font id understood by the host.
    pub font: u16,
    /// Unused.
    pub reserved: u16,
    /// Screen position (x, y).
    pub position: [f32; 2],
}

impl DrawSlot {
    /// Byte offset of the text inside a slot.
    pub const TEXT_OFFSET: usize = std::mem::size_of::<Self>();
}

/// Everything sampled for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    /// Background colour, `None` when disabled.
    pub background: Option<Rgba>,
    /// Foreground colour after the opacity override.
    pub color: Rgba,
    /// Font id.
    pub font: u16,
    /// Alignment.
    pub align: Align,
    /// Wrap width in screen units.
    pub wrap_width: f32,
    /// Text scale.
    pub scale: Vec2,
    /// Final text, case applied and trailing whitespace trimmed.
    pub text: String,
    /// Screen position.
    pub position: Vec2,
}

impl TextFrame {
    /// Packs the frame into the host slot layout.
    #[must_use]
    pub fn to_slot(&self) -> DrawSlot {
        DrawSlot {
            scale: self.scale.to_array(),
            color: self.color.to_array(),
            justify: u8::from(self.align == Align::Left),
            right_justify: u8::from(self.align == Align::Right),
            centered: u8::from(self.align == Align::Center),
            background: u8::from(self.background.is_some()),
            wrap_x: self.wrap_width,
            centre_size: self.wrap_width,
            background_color: self.background.map_or([0; 4], Rgba::to_array),
            font: self.font,
            reserved: 0,
            position: self.position.to_array(),
        }
    }
}

/// The host's ring of drawable text slots.
pub struct DrawRing<'m, M: RawMemory + ?Sized> {
    memory: &'m M,
    slots_base: usize,
    index_address: usize,
    stride: u32,
    capacity: u16,
    screen: ScreenLayout,
    palette: Palette,
}

impl<'m, M: RawMemory + ?Sized> DrawRing<'m, M> {
    /// Smallest stride that still fits a slot and one character of text.
    pub const MIN_STRIDE: u32 = DrawSlot::TEXT_OFFSET as u32 + 4;

    /// Creates a ring over explicit addresses.
    ///
    /// # Errors
    ///
    /// [`UiError::SlotTooSmall`] if `stride` is below [`Self::MIN_STRIDE`],
    /// [`UiError::EmptyRing`] if `capacity` is zero.
    pub fn new(
        memory: &'m M,
        slots_base: usize,
        index_address: usize,
        stride: u32,
        capacity: u16,
        screen: ScreenLayout,
    ) -> Result<Self, UiError> {
        if stride < Self::MIN_STRIDE {
            return Err(UiError::SlotTooSmall {
                stride,
                required: Self::MIN_STRIDE,
            });
        }
        if capacity == 0 {
            return Err(UiError::EmptyRing);
        }
        Ok(Self {
            memory,
            slots_base,
            index_address,
            stride,
            capacity,
            screen,
            palette: Palette::standard(),
        })
    }

    /// Resolves the ring described by a build layout.
    ///
    /// # Errors
    ///
    /// [`CoreError::SymbolNotFound`] for either ring symbol, or
    /// [`UiError::SlotTooSmall`].
    pub fn resolve(memory: &'m M, layout: &BuildLayout) -> Result<Self, UiError> {
        let resolve = |name: &str| {
            memory
                .resolve_symbol(name)
                .ok_or_else(|| CoreError::SymbolNotFound(name.to_owned()))
        };
        let text = &layout.text;
        Self::new(
            memory,
            resolve(&text.slots)?,
            resolve(&text.index)?,
            text.stride,
            text.capacity,
            layout.screen,
        )
    }

    /// Replaces the palette used to resolve colour names.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Swaps the palette in place. Colours already resolved keep their value.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Palette used to resolve colour names.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Screen reference dimensions.
    #[must_use]
    pub fn screen(&self) -> ScreenLayout {
        self.screen
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    /// UTF-16 code units of text a slot holds, excluding the terminator.
    #[must_use]
    pub fn text_capacity(&self) -> usize {
        (self.stride as usize - DrawSlot::TEXT_OFFSET) / 2 - 1
    }

    /// Address of slot `index`.
    #[must_use]
    pub fn slot_address(&self, index: u16) -> usize {
        self.slots_base + usize::from(index) * self.stride as usize
    }

    /// The slot the next draw goes to.
    ///
    /// The host resets the counter every frame. A counter at or past the
    /// end of the ring is clamped to the last slot.
    #[must_use]
    pub fn current_slot(&self) -> u16 {
        let index = self.memory.read_u16(self.index_address, false);
        let last = self.capacity - 1;
        if index > last {
            tracing::warn!(
                "text slot index {} out of range, drawing into slot {}",
                index,
                last
            );
            return last;
        }
        index
    }

    /// Writes `frame` into `slot` and advances the host counter, saturating
    /// at the ring capacity.
    pub fn submit(&self, slot: u16, frame: &TextFrame) {
        let address = self.slot_address(slot);
        self.memory
            .write_bytes(address, bytemuck::bytes_of(&frame.to_slot()));
        self.memory
            .write_utf16(address + DrawSlot::TEXT_OFFSET, &self.fit(&frame.text));

        let next = slot.saturating_add(1).min(self.capacity);
        self.memory.write_u16(self.index_address, next, false);
    }

    /// Longest prefix of `text` that fits a slot, on a char boundary.
    fn fit<'t>(&self, text: &'t str) -> &'t str {
        let limit = self.text_capacity();
        let mut units = 0;
        for (at, ch) in text.char_indices() {
            units += ch.len_utf16();
            if units > limit {
                return &text[..at];
            }
        }
        text
    }

    /// Reads back the slot struct at `slot`.
    #[must_use]
    pub fn read_slot(&self, slot: u16) -> DrawSlot {
        let mut slot_bytes = [0u8; DrawSlot::TEXT_OFFSET];
        self.memory.read_bytes(self.slot_address(slot), &mut slot_bytes);
        bytemuck::pod_read_unaligned(&slot_bytes)
    }
}

/// Scale the host uses for subtitles when none is configured.
const DEFAULT_SCALE: Vec2 = Vec2::new(0.48, 1.12);

/// A text element whose attributes are recomputed on every draw.
///
/// # Example
///
/// ```rust,ignore
/// let mut label = TextDraw::new();
/// label
///     .hex_color("#FF000080")
///     .opacity_percent("50%")?
///     .align(Align::Center)
///     .x_percent("50%")?
///     .y_with(|y| y + 1.0);
///
/// // once per frame
/// label.draw(&ring, "Mission Passed")?;
/// ```
#[derive(Debug)]
pub struct TextDraw {
    background: Option<ColorProducer>,
    color: ColorProducer,
    opacity: Option<OpacityProducer>,
    font: u16,
    align: Align,
    max_width: Option<Dimension>,
    scale: VecProducer,
    case: TextCase,
    position: VecProducer,
}

impl Default for TextDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDraw {
    /// White, left-aligned text at the origin with the default scale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: None,
            color: ColorProducer::fixed(Rgba::WHITE),
            opacity: None,
            font: 1,
            align: Align::Left,
            max_width: None,
            scale: VecProducer::fixed(DEFAULT_SCALE.x, DEFAULT_SCALE.y),
            case: TextCase::Keep,
            position: VecProducer::fixed(0.0, 0.0),
        }
    }

    // =========================================================================
    // Colour
    // =========================================================================

    /// Foreground colour from any spec.
    pub fn color(&mut self, spec: impl Into<ColorSpec>) -> &mut Self {
        self.color = ColorProducer::fixed(spec);
        self
    }

    /// Foreground colour from four channels.
    pub fn rgba(&mut self, r: u8, g: u8, b: u8, a: u8) -> &mut Self {
        self.color(Rgba::new(r, g, b, a))
    }

    /// Foreground colour from the palette, resolved on first draw.
    pub fn named_color(&mut self, name: &str) -> &mut Self {
        self.color(ColorSpec::Named(name.to_owned()))
    }

    /// Foreground colour from `#RRGGBB` / `#RRGGBBAA`, parsed on first draw.
    pub fn hex_color(&mut self, hex: &str) -> &mut Self {
        self.color(ColorSpec::Hex(hex.to_owned()))
    }

    /// Foreground colour recurrence over `(r, g, b, a)`, seeded at white.
    pub fn color_with(
        &mut self,
        f: impl FnMut(u8, u8, u8, u8) -> (u8, u8, u8, u8) + 'static,
    ) -> &mut Self {
        self.color = ColorProducer::recurrence(f);
        self
    }

    // =========================================================================
    // Opacity
    // =========================================================================

    /// Alpha as a ratio of the colour's alpha.
    pub fn opacity(&mut self, ratio: f32) -> &mut Self {
        self.opacity = Some(OpacityProducer::Ratio(ratio));
        self
    }

    /// Alpha from a `"50%"` or `"0.5"` string.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn opacity_percent(&mut self, percent: &str) -> Result<&mut Self, UiError> {
        Ok(self.opacity(parse_ratio(percent)?))
    }

    /// Alpha recurrence over the previous alpha, seeded at 255.
    pub fn opacity_with(&mut self, f: impl FnMut(u8) -> u8 + 'static) -> &mut Self {
        self.opacity = Some(OpacityProducer::recurrence(f));
        self
    }

    /// Removes the opacity override.
    pub fn no_opacity(&mut self) -> &mut Self {
        self.opacity = None;
        self
    }

    // =========================================================================
    // Background
    // =========================================================================

    /// Enables the background box with a colour from any spec.
    pub fn background(&mut self, spec: impl Into<ColorSpec>) -> &mut Self {
        self.background = Some(ColorProducer::fixed(spec));
        self
    }

    /// Enables the background box with a colour recurrence.
    pub fn background_with(
        &mut self,
        f: impl FnMut(u8, u8, u8, u8) -> (u8, u8, u8, u8) + 'static,
    ) -> &mut Self {
        self.background = Some(ColorProducer::recurrence(f));
        self
    }

    /// Removes the background box entirely.
    pub fn no_background(&mut self) -> &mut Self {
        self.background = None;
        self
    }

    // =========================================================================
    // Position & scale
    // =========================================================================

    /// Horizontal position.
    pub fn x(&mut self, x: impl Into<Dimension>) -> &mut Self {
        self.position.set_x(AxisProducer::Fixed(x.into()));
        self
    }

    /// Vertical position.
    pub fn y(&mut self, y: impl Into<Dimension>) -> &mut Self {
        self.position.set_y(AxisProducer::Fixed(y.into()));
        self
    }

    /// Horizontal position from `"25%"` or `"12.5"`.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn x_percent(&mut self, x: &str) -> Result<&mut Self, UiError> {
        Ok(self.x(x.parse::<Dimension>()?))
    }

    /// Vertical position from `"25%"` or `"12.5"`.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn y_percent(&mut self, y: &str) -> Result<&mut Self, UiError> {
        Ok(self.y(y.parse::<Dimension>()?))
    }

    /// Horizontal position recurrence, seeded at 0.
    pub fn x_with(&mut self, f: impl FnMut(f32) -> f32 + 'static) -> &mut Self {
        self.position.set_x(AxisProducer::recurrence(f));
        self
    }

    /// Vertical position recurrence, seeded at 0.
    pub fn y_with(&mut self, f: impl FnMut(f32) -> f32 + 'static) -> &mut Self {
        self.position.set_y(AxisProducer::recurrence(f));
        self
    }

    /// Joint position recurrence, seeded at `(0, 0)`.
    pub fn position_with(&mut self, f: impl FnMut(f32, f32) -> (f32, f32) + 'static) -> &mut Self {
        self.position = VecProducer::joint(f);
        self
    }

    /// Horizontal scale.
    pub fn scale_x(&mut self, x: impl Into<Dimension>) -> &mut Self {
        self.scale.set_x(AxisProducer::Fixed(x.into()));
        self
    }

    /// Vertical scale.
    pub fn scale_y(&mut self, y: impl Into<Dimension>) -> &mut Self {
        self.scale.set_y(AxisProducer::Fixed(y.into()));
        self
    }

    /// Horizontal scale from `"50%"` of the screen width or `"0.5"`.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn scale_x_percent(&mut self, x: &str) -> Result<&mut Self, UiError> {
        Ok(self.scale_x(x.parse::<Dimension>()?))
    }

    /// Vertical scale from `"50%"` of the screen height or `"0.5"`.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn scale_y_percent(&mut self, y: &str) -> Result<&mut Self, UiError> {
        Ok(self.scale_y(y.parse::<Dimension>()?))
    }

    /// Horizontal scale recurrence, seeded at 0.
    pub fn scale_x_with(&mut self, f: impl FnMut(f32) -> f32 + 'static) -> &mut Self {
        self.scale.set_x(AxisProducer::recurrence(f));
        self
    }

    /// Vertical scale recurrence, seeded at 0.
    pub fn scale_y_with(&mut self, f: impl FnMut(f32) -> f32 + 'static) -> &mut Self {
        self.scale.set_y(AxisProducer::recurrence(f));
        self
    }

    /// Joint scale recurrence, seeded at `(0, 0)`.
    pub fn scale_with(&mut self, f: impl FnMut(f32, f32) -> (f32, f32) + 'static) -> &mut Self {
        self.scale = VecProducer::joint(f);
        self
    }

    // =========================================================================
    // Text settings
    // =========================================================================

    /// Case transform.
    pub fn case(&mut self, case: TextCase) -> &mut Self {
        self.case = case;
        self
    }

    /// Alignment.
    pub fn align(&mut self, align: Align) -> &mut Self {
        self.align = align;
        self
    }

    /// Wrap width, fixed or a percentage of the screen width.
    pub fn max_width(&mut self, width: impl Into<Dimension>) -> &mut Self {
        self.max_width = Some(width.into());
        self
    }

    /// Wrap width from `"50%"` of the screen width or `"320"`.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidPercent`] if the string does not parse.
    pub fn max_width_percent(&mut self, width: &str) -> Result<&mut Self, UiError> {
        Ok(self.max_width(width.parse::<Dimension>()?))
    }

    /// Font id.
    pub fn font(&mut self, font: u16) -> &mut Self {
        self.font = font;
        self
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Samples every producer once and writes the result into `ring`.
    ///
    /// # Errors
    ///
    /// Colour resolution errors from the first draw of a named or hex
    /// colour. Nothing is written to the ring and no producer advances.
    pub fn draw<M: RawMemory + ?Sized>(
        &mut self,
        ring: &DrawRing<'_, M>,
        text: &str,
    ) -> Result<TextFrame, UiError> {
        let slot = ring.current_slot();
        let frame = self.sample(ring.palette(), ring.screen(), text)?;
        ring.submit(slot, &frame);
        Ok(frame)
    }

    /// Samples every producer once without touching host memory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::draw`].
    pub fn sample(
        &mut self,
        palette: &Palette,
        screen: ScreenLayout,
        text: &str,
    ) -> Result<TextFrame, UiError> {
        if let Some(producer) = self.background.as_mut() {
            producer.resolve(palette)?;
        }
        self.color.resolve(palette)?;

        let background = match self.background.as_mut() {
            Some(producer) => Some(producer.advance(palette)?),
            None => None,
        };

        let mut color = self.color.advance(palette)?;
        if let Some(opacity) = self.opacity.as_mut() {
            color = opacity.apply(color);
        }

        let wrap_width = self
            .max_width
            .map_or(screen.width, |width| width.resolve(screen.width));

        let scale = self.scale.advance(screen.size());
        let text = self.case.apply(text);
        let position = self.position.advance(screen.size());

        Ok(TextFrame {
            background,
            color,
            font: self.font,
            align: self.align,
            wrap_width,
            scale,
            text,
            position,
        })
    }
}
