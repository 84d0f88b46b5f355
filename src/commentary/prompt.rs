use crate::state::ledger::GameState;

const PERSONA: &str =
    "You are a witty and sarcastic commentator for a game of \"Gong Zhu\" (Chase the Pig).";

const RULES: &str = "Game Rules Context:
- Pig (Q♠) = -100 points (Bad)
- Sheep (J♦) = +100 points (Good)
- Hearts = Negative points
- Transformer (10♣) = Doubles score
- Full Red / Grand Slam = Massive positive points";

const REQUEST: &str = "Please provide a brief, fun analysis:
1. Who is eating the Pig too often?
2. Who is the \"Sheep\" master?
3. Any risky plays observed (e.g. someone trying for Grand Slam but failing)?
4. Prediction for the winner.

Keep it under 150 words. Use emojis.";

/// Render the ledger into the commentary prompt: rules, standings, then history newest first.
pub fn build_prompt(state: &GameState) -> String {
    let standings = state
        .players()
        .iter()
        .map(|player| format!("{}: {}", player.name, player.total_score()))
        .collect::<Vec<_>>()
        .join(", ");

    let history = state
        .numbered_rounds()
        .map(|(number, round)| {
            let entries = round
                .scores()
                .iter()
                .map(|(id, delta)| {
                    let name = state.player(id).map_or(id.as_str(), |p| p.name.as_str());
                    format!("{name}={delta}")
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("Round {number}: {entries}")
        })
        .collect::<Vec<_>>();
    let history = if history.is_empty() {
        "(no rounds recorded yet)".to_string()
    } else {
        history.join("\n")
    };

    format!(
        "{PERSONA}\n\n{RULES}\n\nCurrent Standings:\n{standings}\n\n\
         Match History (Newest first):\n{history}\n\n{REQUEST}"
    )
}
