//! Print the scene graph as a table or JSON.

use comfy_table::{ContentArrangement, Table};

use sf_story::SceneTable;

pub fn run(json: bool) -> Result<(), String> {
    let table = SceneTable::builtin();

    if json {
        let out = serde_json::to_string_pretty(table.scenes()).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(vec!["ID", "Title", "Choices", "Ending"]);

    for scene in table.scenes() {
        let choices = scene
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {} -> {}", i + 1, c.label, c.target))
            .collect::<Vec<_>>()
            .join("\n");
        let ending = if scene.is_ending() { "yes" } else { "" };
        out.add_row(vec![scene.id.as_str(), scene.title.as_str(), choices.as_str(), ending]);
    }

    println!("{out}");
    println!();
    println!("  {} scenes, start: {}", table.len(), table.start().id);

    Ok(())
}
