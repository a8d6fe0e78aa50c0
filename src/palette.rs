/// Block colors as RGB, shared by the terminal and window front-ends.
pub const FLUID_COLORS: [[u8; 3]; 16] = [
    [255, 0, 0],     //RED
    [0, 90, 255],    //BLUE
    [255, 255, 0],   //YELLOW
    [0, 160, 0],     //GREEN
    [160, 32, 240],  //PURPLE
    [255, 165, 0],   //ORANGE
    [0, 255, 255],   //CYAN
    [255, 0, 255],   //MAGENTA
    [0, 255, 0],     //LIME
    [255, 192, 203], //PINK
    [165, 42, 42],   //BROWN
    [64, 224, 208],  //TURQUOISE
    [128, 128, 0],   //OLIVE
    [255, 215, 0],   //GOLD
    [192, 192, 192], //SILVER
    [255, 127, 80],  //CORAL
];

/// Index into `FLUID_COLORS` for `symbol`. Symbols listed in `symbols`
/// keep their position; anything else falls back to its code point.
pub fn color_index(symbols: &[char], symbol: char) -> usize {
    let slot = symbols
        .iter()
        .position(|s| *s == symbol)
        .unwrap_or(symbol as usize);
    slot % FLUID_COLORS.len()
}
