//! End-to-end behaviour of the embed frameworks script generator.

use kodegen_bundler_embed::embed::runtime::select_runtime_slice;
use kodegen_bundler_embed::embed::{
    ArtifactSpec, EmbedFrameworksScript, Error, Invocation, MultiSliceArtifact, Settings,
    SettingsBuilder, Slice,
};

fn framework(path: &str) -> ArtifactSpec {
    ArtifactSpec::new(path).unwrap()
}

fn settings(builder: SettingsBuilder) -> Settings {
    builder.sandbox_root("/p/Pods").platform("ios").build().unwrap()
}

fn block_header(config: &str) -> String {
    format!("if [[ \"$CONFIGURATION\" == \"{config}\" ]]; then\n")
}

/// Lines between the block header of `config` and its closing `fi`.
fn block_lines(script: &str, config: &str) -> Vec<String> {
    let header = block_header(config);
    let start = script.find(&header).expect("block present") + header.len();
    script[start..]
        .lines()
        .take_while(|line| *line != "fi")
        .map(str::to_string)
        .collect()
}

#[test]
fn configurations_without_artifacts_get_no_block() {
    let settings = settings(
        SettingsBuilder::new()
            .frameworks("Debug", vec![framework("${BUILT_PRODUCTS_DIR}/A/A.framework")])
            .frameworks("Release", vec![]),
    );
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();

    assert!(script.contents().contains(&block_header("Debug")));
    assert!(!script.contents().contains(&block_header("Release")));
}

#[test]
fn blocks_are_ordered_lexicographically_regardless_of_input_order() {
    let forward = settings(
        SettingsBuilder::new()
            .frameworks("Release", vec![framework("R.framework")])
            .frameworks("Debug", vec![framework("D.framework")])
            .frameworks("AppStore", vec![framework("S.framework")]),
    );
    let backward = settings(
        SettingsBuilder::new()
            .frameworks("AppStore", vec![framework("S.framework")])
            .frameworks("Debug", vec![framework("D.framework")])
            .frameworks("Release", vec![framework("R.framework")]),
    );

    let a = EmbedFrameworksScript::new(&forward).generate().unwrap();
    let b = EmbedFrameworksScript::new(&backward).generate().unwrap();
    assert_eq!(a, b);

    let contents = a.contents();
    let app_store = contents.find(&block_header("AppStore")).unwrap();
    let debug = contents.find(&block_header("Debug")).unwrap();
    let release = contents.find(&block_header("Release")).unwrap();
    assert!(app_store < debug && debug < release);
}

#[test]
fn uppercase_configurations_sort_before_lowercase() {
    let settings = settings(
        SettingsBuilder::new()
            .frameworks("beta", vec![framework("B.framework")])
            .frameworks("Zeta", vec![framework("Z.framework")]),
    );
    let groups = EmbedFrameworksScript::new(&settings).invocations().unwrap();
    let names: Vec<&str> = groups.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Zeta", "beta"]);
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let settings = settings(
        SettingsBuilder::new()
            .frameworks("Debug", vec![framework("A.framework")])
            .frameworks("Release", vec![framework("B.framework").with_dsym_path("B.dSYM")])
            .xcframeworks(
                "Debug",
                vec![
                    MultiSliceArtifact::new(
                        "/p/Pods/C/C.xcframework",
                        vec![Slice::new("ios", "ios-arm64/C.framework", true)],
                    )
                    .unwrap(),
                ],
            ),
    );

    let first = EmbedFrameworksScript::new(&settings).generate().unwrap();
    let second = EmbedFrameworksScript::new(&settings).generate().unwrap();
    assert_eq!(first.contents().as_bytes(), second.contents().as_bytes());
}

#[test]
fn release_framework_with_dsym_and_bcsymbolmaps() {
    let settings = settings(SettingsBuilder::new().frameworks(
        "Release",
        vec![
            framework("${PODS_ROOT}/V/V.framework")
                .with_dsym_path("${PODS_ROOT}/V/V.framework.dSYM")
                .with_bcsymbolmap_paths(vec![
                    "${PODS_ROOT}/V/1.bcsymbolmap".to_string(),
                    "${PODS_ROOT}/V/2.bcsymbolmap".to_string(),
                ]),
        ],
    ));
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();

    assert_eq!(
        block_lines(script.contents(), "Release"),
        [
            "  install_framework \"${PODS_ROOT}/V/V.framework\"",
            "  install_dsym \"${PODS_ROOT}/V/V.framework.dSYM\"",
            "  install_bcsymbolmap \"${PODS_ROOT}/V/1.bcsymbolmap\"",
            "  install_bcsymbolmap \"${PODS_ROOT}/V/2.bcsymbolmap\"",
        ]
    );
}

#[test]
fn framework_without_dsym_emits_no_dsym_statement() {
    let settings = settings(
        SettingsBuilder::new().frameworks("Debug", vec![framework("${BUILT_PRODUCTS_DIR}/A/A.framework")]),
    );
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();

    assert_eq!(
        block_lines(script.contents(), "Debug"),
        ["  install_framework \"${BUILT_PRODUCTS_DIR}/A/A.framework\""]
    );
}

#[test]
fn no_content_renders_only_routines_and_wait() {
    let settings = settings(SettingsBuilder::new());
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();
    let contents = script.contents();

    assert!(contents.starts_with("#!/bin/sh\nset -e\nset -u\nset -o pipefail\n"));
    assert!(!contents.contains("$CONFIGURATION\" =="));
    assert!(contents.ends_with(
        "if [ \"${COCOAPODS_PARALLEL_CODE_SIGN}\" == \"true\" ]; then\n  wait\nfi\n"
    ));
}

#[test]
fn empty_configuration_name_is_rejected() {
    let settings = settings(SettingsBuilder::new().frameworks("", vec![framework("A.framework")]));
    let err = EmbedFrameworksScript::new(&settings).generate().unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn xcframework_statement_is_relative_to_sandbox_root() {
    let xcframework = MultiSliceArtifact::new(
        "/p/Pods/C/C.xcframework",
        vec![
            Slice::new("ios", "ios-arm64/C.framework", true),
            Slice::new("ios", "ios-arm64_x86_64-simulator/C.framework", true),
        ],
    )
    .unwrap();
    let settings = settings(SettingsBuilder::new().xcframeworks("Debug", vec![xcframework]));
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();

    assert_eq!(
        block_lines(script.contents(), "Debug"),
        [concat!(
            "  install_xcframework \"${PODS_ROOT}/C/C.xcframework\" ",
            "\"ios-arm64/C.framework\" \"ios-arm64_x86_64-simulator/C.framework\""
        )]
    );
}

#[test]
fn xcframework_without_matching_dynamic_slice_is_skipped() {
    let static_only = MultiSliceArtifact::new(
        "/p/Pods/S/S.xcframework",
        vec![
            Slice::new("ios", "ios-arm64/libS.a", false),
            Slice::new("tvos", "tvos-arm64/S.framework", true),
        ],
    )
    .unwrap();
    let settings = settings(SettingsBuilder::new().xcframeworks("Debug", vec![static_only]));

    let groups = EmbedFrameworksScript::new(&settings).invocations().unwrap();
    assert!(groups.is_empty());

    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();
    assert!(!script.contents().contains(&block_header("Debug")));
}

#[test]
fn frameworks_precede_xcframeworks_within_a_configuration() {
    let xcframework = MultiSliceArtifact::new(
        "/p/Pods/C/C.xcframework",
        vec![Slice::new("ios", "ios-arm64/C.framework", true)],
    )
    .unwrap();
    let settings = settings(
        SettingsBuilder::new()
            .xcframeworks("Debug", vec![xcframework])
            .frameworks("Debug", vec![framework("A.framework"), framework("B.framework")]),
    );
    let groups = EmbedFrameworksScript::new(&settings).invocations().unwrap();
    let routines: Vec<&str> = groups.statements("Debug").iter().map(Invocation::routine).collect();
    assert_eq!(routines, ["install_framework", "install_framework", "install_xcframework"]);
}

#[test]
fn runtime_pick_comes_from_generated_slices() {
    let xcframework = MultiSliceArtifact::new(
        "/p/Pods/C/C.xcframework",
        vec![
            Slice::new("ios", "ios-arm64/C.framework", true),
            Slice::new("ios", "ios-arm64_x86_64-simulator/C.framework", true),
            Slice::new("ios", "ios-armv7/libC.a", false),
        ],
    )
    .unwrap();
    let settings = settings(SettingsBuilder::new().xcframeworks("Debug", vec![xcframework]));
    let groups = EmbedFrameworksScript::new(&settings).invocations().unwrap();

    let Invocation::InstallXcframework { slices, .. } = &groups.statements("Debug")[0] else {
        panic!("expected an xcframework statement");
    };

    // Every runtime pick is one of the generated candidates; static slices never reach it.
    assert_eq!(select_runtime_slice(slices.as_slice(), "arm64"), Some("ios-arm64/C.framework"));
    assert_eq!(
        select_runtime_slice(slices.as_slice(), "x86_64"),
        Some("ios-arm64_x86_64-simulator/C.framework")
    );
    assert_eq!(select_runtime_slice(slices.as_slice(), "armv7"), None);
}

#[test]
fn sandbox_root_with_parent_segments_is_cleaned() {
    let xcframework = MultiSliceArtifact::new(
        "/p/Pods/C/C.xcframework",
        vec![Slice::new("ios", "ios-arm64/C.framework", true)],
    )
    .unwrap();
    let settings = SettingsBuilder::new()
        .sandbox_root("/p/App/../Pods")
        .platform("ios")
        .xcframeworks("Debug", vec![xcframework])
        .build()
        .unwrap();
    let script = EmbedFrameworksScript::new(&settings).generate().unwrap();

    assert_eq!(
        block_lines(script.contents(), "Debug"),
        ["  install_xcframework \"${PODS_ROOT}/C/C.xcframework\" \"ios-arm64/C.framework\""]
    );
}
