//! KubeJS server script (`kubejs/server_scripts`).

use std::fmt::Write as _;

use super::{shaped, ItemId, RecipeForm, RecipeKind};

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn item(id: &ItemId) -> String {
    quote(&id.to_string())
}

fn output(form: &RecipeForm, id: &ItemId) -> String {
    if form.count > 1 {
        format!("Item.of({}, {})", item(id), form.count)
    } else {
        item(id)
    }
}

fn call(form: &RecipeForm, out: &ItemId, input: &ItemId) -> Option<String> {
    let result = output(form, out);
    let text = match form.kind {
        RecipeKind::Shaped => {
            let layout = shaped::layout(&form.grid)?;
            let rows: Vec<String> = layout.pattern.iter().map(|r| format!("    {}", quote(r))).collect();
            let keys: Vec<String> = layout
                .keys
                .iter()
                .map(|(k, id)| format!("    {}: {}", k, item(id)))
                .collect();
            format!(
                "event.shaped({}, [\n{}\n  ], {{\n{}\n  }})",
                result,
                rows.join(",\n"),
                keys.join(",\n")
            )
        }
        RecipeKind::Shapeless => {
            let inputs: Vec<String> = form.ingredients().map(item).collect();
            format!("event.shapeless({}, [{}])", result, inputs.join(", "))
        }
        RecipeKind::Stonecutting => format!("event.stonecutting({}, {})", result, item(input)),
        RecipeKind::Smelting
        | RecipeKind::Blasting
        | RecipeKind::Smoking
        | RecipeKind::CampfireCooking => {
            let method = match form.kind {
                RecipeKind::Blasting => "blasting",
                RecipeKind::Smoking => "smoking",
                RecipeKind::CampfireCooking => "campfireCooking",
                _ => "smelting",
            };
            format!(
                "event.{}({}, {}).xp({}).cookingTime({})",
                method,
                result,
                item(input),
                form.experience,
                form.cook_time
            )
        }
    };
    Some(text)
}

pub(super) fn generate(form: &RecipeForm) -> String {
    let (Some(out), Some(input)) = (&form.output, form.primary_input()) else {
        return String::new();
    };
    let Some(mut body) = call(form, out, input) else {
        return String::new();
    };
    if let Some(id) = form.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let _ = write!(body, ".id({})", quote(id));
    }
    format!("ServerEvents.recipes(event => {{\n  {}\n}})\n", body)
}

#[cfg(test)]
mod tests {
    use super::super::{generate as render, OutputFormat};
    use super::*;

    #[test]
    fn test_shaped_script() {
        let form = super::super::tests::pickaxe();
        let text = render(&form, OutputFormat::KubeJs);
        let expected = "ServerEvents.recipes(event => {\n  event.shaped('minecraft:diamond_pickaxe', [\n    'AAA',\n    ' B ',\n    ' B '\n  ], {\n    A: 'minecraft:diamond',\n    B: 'minecraft:stick'\n  })\n})\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_blasting_with_count_and_id() {
        let mut form = RecipeForm::new(RecipeKind::Blasting);
        form.set_slot(3, ItemId::parse("raw_gold").ok());
        form.output = ItemId::parse("gold_ingot").ok();
        form.count = 2;
        form.experience = 1.0;
        form.id = Some("packdeck:gold_blast".into());
        let text = render(&form, OutputFormat::KubeJs);
        assert!(text.contains(
            "event.blasting(Item.of('minecraft:gold_ingot', 2), 'minecraft:raw_gold').xp(1).cookingTime(100).id('packdeck:gold_blast')"
        ));
    }

    #[test]
    fn test_quotes_escaped_in_id() {
        assert_eq!(quote("it's"), "'it\\'s'");
    }
}
