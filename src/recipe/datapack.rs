//! Vanilla datapack JSON.

use serde_json::{json, Map, Value};

use super::{shaped, RecipeForm, RecipeKind};

fn item_object(id: &impl ToString) -> Value {
    json!({ "item": id.to_string() })
}

pub(super) fn generate(form: &RecipeForm) -> String {
    let (Some(output), Some(input)) = (&form.output, form.primary_input()) else {
        return String::new();
    };
    let kind = format!("minecraft:{}", form.kind.as_str());

    let value = match form.kind {
        RecipeKind::Shaped => {
            let Some(layout) = shaped::layout(&form.grid) else {
                return String::new();
            };
            let key: Map<String, Value> = layout
                .keys
                .iter()
                .map(|(k, id)| (k.to_string(), item_object(id)))
                .collect();
            json!({
                "type": kind,
                "pattern": layout.pattern,
                "key": key,
                "result": { "item": output.to_string(), "count": form.count },
            })
        }
        RecipeKind::Shapeless => json!({
            "type": kind,
            "ingredients": form.ingredients().map(|id| item_object(id)).collect::<Vec<_>>(),
            "result": { "item": output.to_string(), "count": form.count },
        }),
        RecipeKind::Stonecutting => json!({
            "type": kind,
            "ingredient": item_object(input),
            "result": output.to_string(),
            "count": form.count,
        }),
        RecipeKind::Smelting
        | RecipeKind::Blasting
        | RecipeKind::Smoking
        | RecipeKind::CampfireCooking => json!({
            "type": kind,
            "ingredient": item_object(input),
            "result": output.to_string(),
            "experience": form.experience,
            "cookingtime": form.cook_time,
        }),
    };

    serde_json::to_string_pretty(&value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::super::{generate as render, ItemId, OutputFormat};
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_shaped() {
        let form = super::super::tests::pickaxe();
        let value = parse(&render(&form, OutputFormat::Datapack));
        assert_eq!(value["type"], "minecraft:crafting_shaped");
        assert_eq!(value["pattern"], json!(["AAA", " B ", " B "]));
        assert_eq!(value["key"]["A"]["item"], "minecraft:diamond");
        assert_eq!(value["key"]["B"]["item"], "minecraft:stick");
        assert_eq!(value["result"], json!({ "item": "minecraft:diamond_pickaxe", "count": 1 }));
    }

    #[test]
    fn test_smelting() {
        let mut form = RecipeForm::new(RecipeKind::Smelting);
        form.set_slot(0, ItemId::parse("raw_iron").ok());
        form.output = ItemId::parse("iron_ingot").ok();
        form.experience = 0.7;
        let value = parse(&render(&form, OutputFormat::Datapack));
        assert_eq!(value["ingredient"]["item"], "minecraft:raw_iron");
        assert_eq!(value["result"], "minecraft:iron_ingot");
        assert_eq!(value["cookingtime"], 200);
        assert_eq!(value["experience"], 0.7);
    }

    #[test]
    fn test_shapeless_keeps_duplicates() {
        let mut form = RecipeForm::new(RecipeKind::Shapeless);
        form.set_slot(2, ItemId::parse("sand").ok());
        form.set_slot(5, ItemId::parse("sand").ok());
        form.set_slot(8, ItemId::parse("gravel").ok());
        form.output = ItemId::parse("coarse_dirt").ok();
        form.count = 4;
        let value = parse(&render(&form, OutputFormat::Datapack));
        assert_eq!(value["ingredients"].as_array().unwrap().len(), 3);
        assert_eq!(value["result"]["count"], 4);
    }
}
