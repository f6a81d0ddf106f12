//! Prompt building functions for the hosted models

/// Used when the vision model describes nothing
pub const FALLBACK_DESCRIPTION: &str = "A cute cartoon character";

/// Instruction for the vision model that turns a drawing into an artist brief
pub fn build_describe_prompt() -> &'static str {
    "Describe this child's drawing for an artist to recreate as a Pixar 3D character.\n\n\
     List: 1) What creature/character is it 2) ALL colors and where they appear \
     3) Body shape and parts 4) Face features 5) Any special details like hats, wings, patterns.\n\n\
     Be very specific and faithful to the drawing. Don't add features not present. \
     English only, max 150 words."
}

/// Text-to-image prompt that recreates a described drawing
pub fn build_recreate_prompt(description: &str) -> String {
    format!(
        "EXACTLY recreate this character: {}\n\n\
         IMPORTANT: Keep the EXACT same colors, shapes, and features from the description above.\n\
         Render it in cute 3D animated style with soft lighting and white background.\n\
         Do NOT change the character's design, colors, or features.",
        description.trim()
    )
}

/// Image-edit prompt applied directly to the drawing
pub fn build_edit_prompt() -> &'static str {
    "Turn this child's drawing into a cute 3D animated character.\n\
     Keep the EXACT same creature, colors, shapes, and features as the drawing.\n\
     Do NOT add features that are not in the drawing.\n\
     Soft lighting, white background, friendly expression."
}

/// Image-to-video prompt for a mentor talking about a topic
pub fn build_animate_prompt(topic: &str) -> String {
    format!(
        "A cute animated mentor character teaching a child about {}.\n\
         The character is friendly, gently animated, making small movements, looking at the viewer warmly.\n\
         Educational children's video style, colorful background, engaging, fun learning moment.\n\
         The character seems to be explaining something with enthusiasm.",
        topic.trim()
    )
}

/// Script prompt for a roughly twenty second spoken lesson in Turkish
pub fn build_lesson_script_prompt(topic: &str) -> String {
    format!(
        "Write a short spoken lesson script in Turkish about: {}\n\n\
         Rules:\n\
         - It must take about 20 seconds to say out loud (50-60 words).\n\
         - Speak directly and warmly to young learners.\n\
         - Turkish only.\n\
         - Output only the words to be spoken. No title, no stage directions, no emojis, no commentary.",
        topic.trim()
    )
}

/// Trim model chatter that wraps an otherwise usable script
pub fn clean_script(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '"' || c == '“' || c == '”')
        .trim()
        .to_string()
}
