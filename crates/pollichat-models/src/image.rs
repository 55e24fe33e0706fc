// ============================================================================
// Image Generation Constants
// ============================================================================

/// Largest width accepted by the image API
pub const MAX_WIDTH: u32 = 1704;

/// Largest height accepted by the image API
pub const MAX_HEIGHT: u32 = 960;

/// Smallest accepted edge length
pub const MIN_DIMENSION: u32 = 64;

/// Image model offered by the image API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageModel {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models in the order they are generated in compare mode
pub const IMAGE_MODELS: &[ImageModel] = &[
    ImageModel { id: "flux", name: "Flux" },
    ImageModel { id: "flux-pro", name: "Flux Pro" },
    ImageModel { id: "sdxl", name: "SDXL" },
    ImageModel { id: "kandinsky", name: "Kandinsky" },
    ImageModel { id: "playground", name: "Playground" },
];

impl ImageModel {
    pub fn find(id: &str) -> Option<ImageModel> {
        IMAGE_MODELS
            .iter()
            .copied()
            .find(|model| model.id.eq_ignore_ascii_case(id))
    }
}

/// Named output sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    Square,
    Landscape,
    Portrait,
    Max,
}

impl SizePreset {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SizePreset::Square => (1024, 1024),
            SizePreset::Landscape => (1280, 720),
            SizePreset::Portrait => (720, 1280),
            SizePreset::Max => (MAX_WIDTH, MAX_HEIGHT),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "standard" => Some(Self::Square),
            "landscape" => Some(Self::Landscape),
            "portrait" => Some(Self::Portrait),
            "max" | "maximum" => Some(Self::Max),
            _ => None,
        }
    }
}

/// Prompt ideas handed out by `--random-prompt`
pub const PROMPT_TEMPLATES: &[&str] = &[
    "A beautiful landscape with mountains and a lake at sunset",
    "A futuristic city skyline with flying cars and neon lights",
    "A magical forest with glowing butterflies and fairy lights",
    "An ancient temple covered in vines under moonlight",
    "A cozy cafe interior with warm lighting and vintage decorations",
    "A cyberpunk street scene with rain and reflections",
    "A serene Japanese garden with cherry blossoms",
    "An underwater scene with colorful coral reefs and fish",
    "A steampunk laboratory with complex machinery",
    "A fantasy castle floating in the clouds",
];
