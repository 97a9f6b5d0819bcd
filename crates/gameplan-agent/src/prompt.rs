//! Prompt builders. The crate stays decoupled from the core domain types:
//! callers pass plain strings and pre-formatted call lists.

use crate::types::ChatMessage;

/// A scouting summary in prompt-ready form.
#[derive(Debug, Clone, Default)]
pub struct ScoutingBrief {
    pub opponent: String,
    /// "name pct%" lines, one per front.
    pub fronts: Vec<String>,
    pub coverages: Vec<String>,
    pub blitzes: Vec<String>,
    pub blitz_pct: f64,
    pub motion_pct: f64,
    pub notes: Option<String>,
}

impl ScoutingBrief {
    fn render(&self) -> String {
        let mut out = format!("Opponent: {}\n", self.opponent);
        out.push_str(&format!("Fronts: {}\n", join_or_none(&self.fronts)));
        out.push_str(&format!("Coverages: {}\n", join_or_none(&self.coverages)));
        out.push_str(&format!("Blitzes: {}\n", join_or_none(&self.blitzes)));
        out.push_str(&format!(
            "Blitz rate: {:.0}%  Motion response checked at: {:.0}%\n",
            self.blitz_pct, self.motion_pct
        ));
        if let Some(notes) = &self.notes {
            if !notes.trim().is_empty() {
                out.push_str(&format!("Notes: {notes}\n"));
            }
        }
        out
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none reported".to_string()
    } else {
        items.join(", ")
    }
}

/// Messages asking for a complete call sheet as JSON. `sections` holds
/// "category: call, call, …" lines drawn from the active play pool.
pub fn game_plan_messages(brief: &ScoutingBrief, sections: &[String]) -> Vec<ChatMessage> {
    let system = "You are an offensive coordinator's assistant. You build game plans \
         strictly from the plays the coach gives you. Respond with a single JSON \
         object and nothing else. Keys: run_game, rpo_game, quick_game, \
         dropback_game, shot_plays, screen_game, third_and_short, \
         third_and_medium, third_and_long, red_zone, goal_line, two_minute \
         (arrays of call strings, chosen only from the provided plays), and \
         notes (string). Omit no keys.";

    let user = format!(
        "Scouting report:\n{}\nAvailable plays by category:\n{}\n\
         Build the game plan. Favor plays whose beaters match the opponent's \
         most-used looks, and keep situational sections to 3-6 calls each.",
        brief.render(),
        sections.join("\n"),
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Messages asking for a short analysis of the scouting report itself.
pub fn scouting_analysis_messages(brief: &ScoutingBrief) -> Vec<ChatMessage> {
    let system = "You are a football analyst. Respond with a single JSON object and \
         nothing else. Keys: summary (string, two or three sentences), keys \
         (array of coaching points), suggested_fronts (array of front names \
         the offense should practice against).";

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!("Scouting report:\n{}", brief.render())),
    ]
}
