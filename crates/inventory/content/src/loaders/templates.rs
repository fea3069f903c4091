//! Item template catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::bail;
use inventory_core::{ShapeLibrary, StaticTemplates, Template, TemplateRules, TypeTag};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Template catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub templates: Vec<Template>,
}

/// Loader for item templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load and validate the template catalog.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a TemplateCatalog
    /// * `shapes` - Shape table every template's shape must exist in
    pub fn load(path: &Path, shapes: &ShapeLibrary) -> LoadResult<StaticTemplates> {
        let content = read_file(path)?;
        Self::parse(&content, shapes)
    }

    pub fn parse(content: &str, shapes: &ShapeLibrary) -> LoadResult<StaticTemplates> {
        let catalog: TemplateCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template catalog RON: {}", e))?;
        Self::validate(&catalog.templates, shapes)?;
        Ok(catalog.templates.into_iter().collect())
    }

    /// Cross-checks a catalog: unique ids, known shapes, sane stacks and
    /// weapons pointing at ammunition that exists.
    pub fn validate(templates: &[Template], shapes: &ShapeLibrary) -> LoadResult<()> {
        let mut seen = BTreeSet::new();
        for template in templates {
            if !seen.insert(&template.id) {
                bail!("template '{}' is defined twice", template.id);
            }
            if !shapes.contains(template.shape) {
                bail!("template '{}' uses unknown {}", template.id, template.shape);
            }
            if template.max_stack == 0 {
                bail!("template '{}' has max_stack 0", template.id);
            }
        }

        for template in templates {
            let TemplateRules::RangedWeapon(rules) = &template.rules else {
                continue;
            };
            let Some(ammo) = &rules.ammo else {
                continue;
            };
            match templates.iter().find(|t| &t.id == ammo) {
                Some(t) if t.type_tag() == TypeTag::Ammo => {}
                Some(t) => bail!(
                    "template '{}' loads '{}', which is {} not ammo",
                    template.id,
                    ammo,
                    t.type_tag()
                ),
                None => bail!("template '{}' loads unknown ammo '{}'", template.id, ammo),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use inventory_core::{ShapeId, TemplateId};

    use super::*;

    const CATALOG: &str = r#"(
        templates: [
            (
                id: "pistol_ammo",
                shape: 0,
                rules: Ammo((max_ammo_per_stack: 30)),
                max_stack: 3,
            ),
            (
                id: "pistol",
                shape: 4,
                rules: RangedWeapon((
                    durability: (max_condition: 100),
                    magazine_size: 12,
                    ammo: Some("pistol_ammo"),
                )),
            ),
            (
                id: "flare",
                shape: 0,
                rules: Throwable(damage: 5),
            ),
        ],
    )"#;

    #[test]
    fn test_load_template_catalog() {
        let templates =
            TemplateLoader::parse(CATALOG, &ShapeLibrary::builtin()).expect("catalog parses");
        assert_eq!(templates.len(), 3);

        let pistol = templates.get(&TemplateId::new("pistol")).unwrap();
        assert_eq!(pistol.shape, ShapeId::SQUARE_2);
        assert_eq!(pistol.max_stack, 1);
        assert_eq!(pistol.type_tag(), TypeTag::RangedWeapon);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        let catalog = CATALOG.replace("shape: 4", "shape: 400");
        let error = TemplateLoader::parse(&catalog, &ShapeLibrary::builtin()).unwrap_err();
        assert!(error.to_string().contains("unknown shape#400"));
    }

    #[test]
    fn test_rejects_dangling_ammo() {
        let catalog = CATALOG.replace("Some(\"pistol_ammo\")", "Some(\"rocket\")");
        assert!(TemplateLoader::parse(&catalog, &ShapeLibrary::builtin()).is_err());

        let catalog = CATALOG.replace("Some(\"pistol_ammo\")", "Some(\"flare\")");
        assert!(TemplateLoader::parse(&catalog, &ShapeLibrary::builtin()).is_err());
    }
}
