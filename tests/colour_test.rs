use portal_scene::{SceneError, data_structures::colour::Colour};

#[test]
fn should_parse_long_and_short_hex() {
    assert_eq!(Colour::from_hex("#adf3ff").unwrap(), Colour::new(0xad, 0xf3, 0xff));
    assert_eq!(Colour::from_hex("374200").unwrap(), Colour::new(0x37, 0x42, 0x00));
    assert_eq!(Colour::from_hex("#fa0").unwrap(), Colour::new(0xff, 0xaa, 0x00));
    assert_eq!(Colour::from_hex("#FFE276").unwrap(), Colour::from_u32(0xffe276));
    assert_eq!("#ffffff".parse::<Colour>().unwrap(), Colour::WHITE);
}

#[test]
fn should_reject_malformed_hex() {
    for input in ["", "#", "#ff", "#ffff", "#fffff", "#fffffff", "#xyzxyz", "+12345"] {
        assert_eq!(
            Colour::from_hex(input),
            Err(SceneError::InvalidColour(input.to_string())),
            "{input:?} was accepted"
        );
    }
}

#[test]
fn should_accept_a_single_leading_hash_only() {
    for input in ["##adf3ff", "##abc", " #abc ", "#adf3ff ", "\tadf3ff", "ad f3ff"] {
        assert_eq!(
            Colour::from_hex(input),
            Err(SceneError::InvalidColour(input.to_string())),
            "{input:?} was accepted"
        );
    }
}

#[test]
fn should_format_as_lowercase_hex() {
    assert_eq!(Colour::new(0xAD, 0xF3, 0xFF).to_hex(), "#adf3ff");
    assert_eq!(Colour::new(0, 0, 0).to_string(), "#000000");
}

#[test]
fn should_convert_to_linear_light() {
    assert_eq!(Colour::new(0, 0, 0).to_linear(), [0.0, 0.0, 0.0]);

    let [r, g, b] = Colour::WHITE.to_linear();
    for channel in [r, g, b] {
        assert!((channel - 1.0).abs() < 1e-6);
    }

    // sRGB 0x80 is roughly 21.6% linear light.
    let [grey, _, _] = Colour::new(0x80, 0x80, 0x80).to_linear();
    assert!((grey - 0.2158).abs() < 1e-3, "grey = {grey}");

    // Below the linear segment threshold the curve is a straight division.
    let [dark, _, _] = Colour::new(10, 0, 0).to_linear();
    assert!((dark - 10.0 / 255.0 / 12.92).abs() < 1e-7);
}

#[test]
fn should_build_an_opaque_clear_colour() {
    let clear = Colour::from_u32(0x374200).to_wgpu();
    assert_eq!(clear.a, 1.0);
    assert!(clear.r > clear.b);
    assert!(clear.g > clear.r);
}

#[test]
fn should_round_trip_through_the_debug_panel_representation() {
    let colour = Colour::from_u32(0xffe276);
    assert_eq!(Colour::from(colour.to_array()), colour);
}
