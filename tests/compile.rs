use ironwind::ast::decl;
use ironwind::utilities::{Compiled, Utility, UtilityTier};
use ironwind::{Compiler, RegistryError};

fn compile(classes: &[&str]) -> String {
    let compiler = Compiler::new();
    let classes: Vec<String> = classes.iter().map(|class| class.to_string()).collect();
    compiler.compile_classes(&classes).css
}

#[test]
fn emits_layer_preamble_and_utilities_layer() {
    let css = compile(&["block"]);
    assert!(css.starts_with("@layer theme, base, components, utilities;\n"));
    assert!(css.contains("@layer utilities {"));
    assert!(css.contains(".block {"));
    assert!(css.contains("display: block;"));
    // No theme variables referenced, so no theme layer.
    assert!(!css.contains("@layer theme {"));
}

#[test]
fn first_variant_produces_the_outermost_wrapper() {
    let css = compile(&["sm:motion-safe:hidden"]);
    assert!(css.contains(".sm\\:motion-safe\\:hidden {"));
    assert!(css.contains("display: none;"));
    let sm = css.find("@media (min-width: 640px)").expect("sm wrapper");
    let motion = css
        .find("@media (prefers-reduced-motion: no-preference)")
        .expect("motion wrapper");
    assert!(sm < motion);
}

#[test]
fn leading_digit_selectors_use_hex_escapes() {
    let css = compile(&["2xl:bg-red-500"]);
    assert!(css.contains(".\\32 xl\\:bg-red-500 {"));
    assert!(css.contains("@media (min-width: 1536px)"));
}

#[test]
fn negative_spacing_folds_the_sign_into_the_multiplier() {
    let css = compile(&["-mx-4"]);
    assert!(css.contains(".-mx-4 {"));
    assert!(css.contains("margin-left: calc(var(--spacing) * -4);"));
    assert!(css.contains("margin-right: calc(var(--spacing) * -4);"));
}

#[test]
fn negative_candidate_of_a_non_negative_utility_is_dropped() {
    let css = compile(&["-p-4"]);
    assert!(!css.contains("padding"));
}

#[test]
fn opacity_modifier_expands_to_color_mix() {
    let css = compile(&["bg-red-500/50"]);
    assert!(css.contains(".bg-red-500\\/50 {"));
    assert!(css.contains(
        "background-color: color-mix(in oklab, var(--color-red-500) 50%, transparent);"
    ));
}

#[test]
fn opacity_modifier_without_a_color_declaration_drops_the_candidate() {
    let css = compile(&["block/50"]);
    assert!(!css.contains("block"));
}

#[test]
fn fraction_values_become_percentage_calcs() {
    let css = compile(&["w-1/2"]);
    assert!(css.contains(".w-1\\/2 {"));
    assert!(css.contains("width: calc(1/2 * 100%);"));
}

#[test]
fn important_marker_applies_to_every_declaration() {
    let css = compile(&["!truncate"]);
    assert!(css.contains("overflow: hidden !important;"));
    assert!(css.contains("text-overflow: ellipsis !important;"));
    assert!(css.contains("white-space: nowrap !important;"));
    let trailing = compile(&["p-4!"]);
    assert!(trailing.contains("padding: calc(var(--spacing) * 4) !important;"));
}

#[test]
fn rules_are_ordered_by_variant_weight_then_input_order() {
    let css = compile(&["md:p-4", "hover:p-4", "p-4", "sm:p-4"]);
    let plain = css.find(".p-4 {").expect("plain");
    let hover = css.find(".hover\\:p-4:hover").expect("hover");
    let sm = css.find(".sm\\:p-4").expect("sm");
    let md = css.find(".md\\:p-4").expect("md");
    assert!(plain < hover);
    assert!(hover < sm);
    assert!(sm < md);
}

#[test]
fn equal_weight_rules_keep_input_order() {
    let css = compile(&["m-2", "p-4"]);
    let margin = css.find(".m-2 {").expect("margin rule");
    let padding = css.find(".p-4 {").expect("padding rule");
    assert!(margin < padding);
}

#[test]
fn unknown_variant_is_skipped_but_the_utility_survives() {
    let css = compile(&["bogus:block"]);
    assert!(css.contains(".bogus\\:block {"));
    assert!(css.contains("display: block;"));
}

#[test]
fn unknown_utilities_produce_no_output() {
    let compiler = Compiler::new();
    let result = compiler.compile_classes(&["definitely-not-a-utility".to_string()]);
    assert_eq!(result.class_count, 0);
}

#[test]
fn arbitrary_property_compiles_to_a_literal_declaration() {
    let css = compile(&["[padding-block:2rem]"]);
    assert!(css.contains(".\\[padding-block\\:2rem\\] {"));
    assert!(css.contains("padding-block: 2rem;"));
}

#[test]
fn arbitrary_values_pass_through_with_underscore_normalization() {
    let css = compile(&["[grid-template-columns:1fr_2fr]"]);
    assert!(css.contains("grid-template-columns: 1fr 2fr;"));
}

#[test]
fn theme_layer_carries_only_referenced_variables() {
    let css = compile(&["bg-red-500", "text-sm"]);
    assert!(css.contains("@layer theme {"));
    assert!(css.contains(":root, :host {"));
    assert!(css.contains("--color-red-500: #ef4444;"));
    assert!(css.contains("--text-sm: 0.875rem;"));
    assert!(!css.contains("--color-blue-500"));
    assert!(!css.contains("--text-lg"));
    let theme = css.find("@layer theme {").expect("theme layer");
    let utilities = css.find("@layer utilities {").expect("utilities layer");
    assert!(theme < utilities);
}

#[test]
fn arbitrary_breakpoint_and_container_variants_wrap_literal_widths() {
    let css = compile(&["min-[600px]:p-4", "@max-[400px]:m-2"]);
    assert!(css.contains(".min-\\[600px\\]\\:p-4 {"));
    assert!(css.contains("@media (min-width: 600px)"));
    assert!(css.contains(".\\@max-\\[400px\\]\\:m-2 {"));
    assert!(css.contains("@container (max-width: 400px)"));
}

#[test]
fn group_and_peer_variants_compose_marker_selectors() {
    let css = compile(&["group-hover:underline", "peer-focus:underline"]);
    assert!(css.contains(".group-hover\\:underline:is(:where(.group):hover *)"));
    assert!(css.contains(".peer-focus\\:underline:is(:where(.peer):focus ~ *)"));
}

#[test]
fn dark_variant_uses_media_query_by_default() {
    let css = compile(&["dark:bg-slate-900"]);
    assert!(css.contains("@media (prefers-color-scheme: dark)"));
}

#[test]
fn dark_selector_strategy_rewrites_the_selector() {
    let mut compiler = Compiler::new();
    compiler.set_dark_selector(".dark &");
    let css = compiler
        .compile_classes(&["dark:bg-slate-900".to_string()])
        .css;
    assert!(css.contains(".dark .dark\\:bg-slate-900 {"));
    assert!(!css.contains("prefers-color-scheme"));
}

#[test]
fn custom_variant_registration_is_used_and_duplicates_rejected() {
    let mut compiler = Compiler::new();
    compiler
        .register_variant("hocus", "&:hover, &:focus", false)
        .expect("registers");
    let err = compiler.register_variant("hocus", "&:hover", false);
    assert!(matches!(err, Err(RegistryError::DuplicateVariant { .. })));

    let css = compiler.compile_classes(&["hocus:underline".to_string()]).css;
    assert!(css.contains(".hocus\\:underline:hover, .hocus\\:underline:focus {"));
}

struct AspectSquare;

impl Utility for AspectSquare {
    fn try_compile(
        &self,
        candidate: &ironwind::candidate::Candidate,
        _theme: &ironwind::theme::Theme,
    ) -> Option<Compiled> {
        if candidate.base() != "aspect-square" {
            return None;
        }
        Some(Compiled::nodes(vec![decl("aspect-ratio", "1 / 1")]))
    }
}

#[test]
fn custom_utility_registration_participates_in_dispatch() {
    let mut compiler = Compiler::new();
    compiler
        .register_utility(
            "aspect-square",
            UtilityTier::ExactStatic,
            Box::new(AspectSquare),
            false,
        )
        .expect("registers");
    let css = compiler
        .compile_classes(&["aspect-square".to_string()])
        .css;
    assert!(css.contains(".aspect-square {"));
    assert!(css.contains("aspect-ratio: 1 / 1;"));
}

#[test]
fn duplicate_utility_registration_requires_overwrite() {
    let mut compiler = Compiler::new();
    let err = compiler.register_utility(
        "padding",
        UtilityTier::ExactStatic,
        Box::new(AspectSquare),
        false,
    );
    assert!(matches!(err, Err(RegistryError::DuplicateUtility { .. })));
    compiler
        .register_utility(
            "padding",
            UtilityTier::ExactStatic,
            Box::new(AspectSquare),
            true,
        )
        .expect("overwrite allowed");
}

#[test]
fn config_extends_theme_and_breakpoints() {
    let config: ironwind::config::Config = toml::from_str(
        r##"
[theme]
spacing = "0.5rem"

[theme.breakpoints]
sm = "40rem"

[theme.colors.brand]
500 = "#3b82f6"
"##,
    )
    .expect("parses");
    let compiler = Compiler::from_config(&config);
    let css = compiler
        .compile_classes(&["bg-brand-500".to_string(), "sm:p-4".to_string()])
        .css;
    assert!(css.contains("background-color: var(--color-brand-500);"));
    assert!(css.contains("--color-brand-500: #3b82f6;"));
    assert!(css.contains("@media (min-width: 40rem)"));
    assert!(css.contains("--spacing: 0.5rem;"));
}

#[test]
fn variant_chains_apply_left_to_right() {
    let css = compile(&["hover:focus:underline", "focus:hover:underline"]);
    assert!(css.contains(".hover\\:focus\\:underline:hover:focus"));
    assert!(css.contains(".focus\\:hover\\:underline:focus:hover"));
}

#[test]
fn duplicate_classes_produce_duplicate_rules_only_once_when_deduped_upstream() {
    // The scanner dedupes; the compiler itself is deliberately literal
    // about its input.
    let compiler = Compiler::new();
    let result = compiler.compile_classes(&["p-4".to_string(), "p-4".to_string()]);
    assert_eq!(result.class_count, 2);
}
