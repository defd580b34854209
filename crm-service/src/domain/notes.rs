//! Operations on the embedded note list. Same addressing scheme as
//! follow-ups: insertion order kept, entries addressed by stable id.

use crate::models::Note;
use crm_core::error::AppError;

pub fn add(list: &mut Vec<Note>, text: String, author: String) -> &Note {
    list.push(Note::new(text, author));
    list.last().expect("just pushed")
}

pub fn update(list: &mut [Note], id: &str, text: String) -> Result<(), AppError> {
    let entry = list
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| not_found(id))?;
    entry.text = text;
    Ok(())
}

pub fn remove(list: &mut Vec<Note>, id: &str) -> Result<Note, AppError> {
    let position = list
        .iter()
        .position(|n| n.id == id)
        .ok_or_else(|| not_found(id))?;
    Ok(list.remove(position))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("note not found: {}", id))
}
