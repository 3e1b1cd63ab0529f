use portal_scene::SceneError;

#[test]
fn should_describe_every_scene_error() {
    let cases = [
        (
            SceneError::AssetLoad {
                asset: "portal.glb".to_string(),
                reason: "not found".to_string(),
            },
            "failed to load asset portal.glb: not found",
        ),
        (
            SceneError::NodeNotFound("Circle".to_string()),
            "node \"Circle\" not found in the loaded scene",
        ),
        (
            SceneError::ShaderCompile {
                shader: "portal".to_string(),
                reason: "bad binding".to_string(),
            },
            "shader portal failed to compile: bad binding",
        ),
        (
            SceneError::InvalidColour("#zzz".to_string()),
            "invalid hex colour \"#zzz\"",
        ),
        (
            SceneError::Gpu("no adapter".to_string()),
            "GPU setup failed: no adapter",
        ),
    ];

    for (error, message) in cases {
        assert_eq!(error.to_string(), message);
    }
}

#[test]
fn should_survive_a_round_trip_through_anyhow() {
    let error: anyhow::Error = SceneError::NodeNotFound("Baked".to_string()).into();

    assert_eq!(
        error.downcast_ref::<SceneError>(),
        Some(&SceneError::NodeNotFound("Baked".to_string()))
    );
    assert!(std::error::Error::source(&SceneError::Gpu("x".to_string())).is_none());
}
