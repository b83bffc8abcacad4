//! CraftTweaker ZenScript (1.16+ syntax).

use super::{shaped, ItemId, RecipeForm, RecipeKind};

const EMPTY: &str = "<item:minecraft:air>";

fn bracket(id: &ItemId) -> String {
    format!("<item:{}>", id)
}

fn output(form: &RecipeForm, id: &ItemId) -> String {
    if form.count > 1 {
        format!("{} * {}", bracket(id), form.count)
    } else {
        bracket(id)
    }
}

/// ZenScript recipe names are plain identifiers in a string literal.
fn recipe_name(form: &RecipeForm) -> String {
    form.recipe_name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

pub(super) fn generate(form: &RecipeForm) -> String {
    let (Some(out), Some(input)) = (&form.output, form.primary_input()) else {
        return String::new();
    };
    let name = recipe_name(form);
    let result = output(form, out);

    let statement = match form.kind {
        RecipeKind::Shaped => {
            let rows: Vec<String> = shaped::trimmed_rows(&form.grid)
                .into_iter()
                .map(|row| {
                    let cells: Vec<String> = row
                        .into_iter()
                        .map(|cell| cell.map_or_else(|| EMPTY.to_string(), bracket))
                        .collect();
                    format!("    [{}]", cells.join(", "))
                })
                .collect();
            format!(
                "craftingTable.addShaped(\"{}\", {}, [\n{}\n]);",
                name,
                result,
                rows.join(",\n")
            )
        }
        RecipeKind::Shapeless => {
            let inputs: Vec<String> = form.ingredients().map(bracket).collect();
            format!(
                "craftingTable.addShapeless(\"{}\", {}, [{}]);",
                name,
                result,
                inputs.join(", ")
            )
        }
        RecipeKind::Stonecutting => format!(
            "stoneCutter.addRecipe(\"{}\", {}, {});",
            name,
            result,
            bracket(input)
        ),
        RecipeKind::Smelting
        | RecipeKind::Blasting
        | RecipeKind::Smoking
        | RecipeKind::CampfireCooking => {
            let manager = match form.kind {
                RecipeKind::Blasting => "blastFurnace",
                RecipeKind::Smoking => "smoker",
                RecipeKind::CampfireCooking => "campfire",
                _ => "furnace",
            };
            format!(
                "{}.addRecipe(\"{}\", {}, {}, {}, {});",
                manager,
                name,
                result,
                bracket(input),
                form.experience,
                form.cook_time
            )
        }
    };
    format!("{}\n", statement)
}

#[cfg(test)]
mod tests {
    use super::super::{generate as render, OutputFormat};
    use super::*;

    #[test]
    fn test_shaped_uses_trimmed_grid_with_air() {
        let form = super::super::tests::pickaxe();
        let text = render(&form, OutputFormat::CraftTweaker);
        assert_eq!(
            text,
            "craftingTable.addShaped(\"diamond_pickaxe_crafting_shaped\", <item:minecraft:diamond_pickaxe>, [\n    [<item:minecraft:diamond>, <item:minecraft:diamond>, <item:minecraft:diamond>],\n    [<item:minecraft:air>, <item:minecraft:stick>, <item:minecraft:air>],\n    [<item:minecraft:air>, <item:minecraft:stick>, <item:minecraft:air>]\n]);\n"
        );
    }

    #[test]
    fn test_stonecutting_count() {
        let mut form = RecipeForm::new(RecipeKind::Stonecutting);
        form.set_slot(0, ItemId::parse("stone").ok());
        form.output = ItemId::parse("stone_bricks").ok();
        form.count = 4;
        form.id = Some("packdeck:cut-bricks".into());
        assert_eq!(
            render(&form, OutputFormat::CraftTweaker),
            "stoneCutter.addRecipe(\"packdeck_cut_bricks\", <item:minecraft:stone_bricks> * 4, <item:minecraft:stone>);\n"
        );
    }

    #[test]
    fn test_campfire() {
        let mut form = RecipeForm::new(RecipeKind::CampfireCooking);
        form.set_slot(0, ItemId::parse("potato").ok());
        form.output = ItemId::parse("baked_potato").ok();
        form.experience = 0.35;
        let text = render(&form, OutputFormat::CraftTweaker);
        assert!(text.starts_with("campfire.addRecipe("));
        assert!(text.contains(", 0.35, 600);"));
    }
}
