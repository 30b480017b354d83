//! Glyph constants for backdrop rendering.

/// Particle glyphs from faint to bright. Additive overlaps step up the ramp.
pub const GLOW_RAMP: &[char] = &['.', '·', '∙', '•', '●'];

/// Glyph for thin ring segments.
pub const RING_THIN: char = '·';

/// Glyph for thick ring segments.
pub const RING_THICK: char = '•';

/// Glyph for link segments between particles.
pub const LINK: char = '·';

/// Glyph for the solid core sphere.
pub const CORE: char = '●';

/// Glyph for the core's wireframe shell.
pub const WIREFRAME: char = '○';
