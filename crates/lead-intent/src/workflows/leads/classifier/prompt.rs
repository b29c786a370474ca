use super::super::domain::{Lead, Offer};
use std::fmt::Write as _;

pub const SYSTEM_PROMPT: &str = "You are a helpful B2B sales assistant. Classify lead buying intent \
as High, Medium, or Low for the given offer. Keep reasoning concise.";

const TASK_INSTRUCTION: &str =
    "Task: Classify intent as High, Medium, or Low and explain in 1–2 sentences.";

pub fn build_user_prompt(offer: &Offer, lead: &Lead) -> String {
    let mut prompt = String::new();

    writeln!(&mut prompt, "Offer: {}", offer.name).expect("write offer");
    writeln!(&mut prompt, "Value Props: {}", offer.value_props.join(", ")).expect("write props");
    writeln!(
        &mut prompt,
        "Ideal Use Cases: {}",
        offer.ideal_use_cases.join(", ")
    )
    .expect("write use cases");
    prompt.push('\n');

    writeln!(&mut prompt, "Lead name: {}", lead.name).expect("write name");
    writeln!(&mut prompt, "Role: {}", lead.role).expect("write role");
    writeln!(&mut prompt, "Company: {}", lead.company).expect("write company");
    writeln!(&mut prompt, "Industry: {}", lead.industry).expect("write industry");
    writeln!(&mut prompt, "Location: {}", lead.location).expect("write location");
    writeln!(&mut prompt, "LinkedIn bio: {}", lead.linkedin_bio).expect("write bio");
    prompt.push('\n');

    prompt.push_str(TASK_INSTRUCTION);
    prompt
}
