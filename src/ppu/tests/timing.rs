// Frame timing: vblank window, NMI line, counter wrap-around

use super::step_to;
use crate::ppu::Ppu;

#[test]
fn test_vblank_sets_at_scanline_241_dot_1() {
    let mut ppu = Ppu::new();

    step_to(&mut ppu, 241, 1);
    assert_eq!(ppu.ppustatus & 0x80, 0, "not yet: the dot has not executed");

    ppu.step();
    assert_eq!(ppu.ppustatus & 0x80, 0x80, "vblank rises at (241, 1)");
}

#[test]
fn test_nmi_raised_only_when_enabled() {
    let mut ppu = Ppu::new();
    step_to(&mut ppu, 241, 1);
    ppu.step();
    assert!(!ppu.nmi_pending(), "NMI disabled: the line stays low");

    let mut ppu = Ppu::new();
    ppu.write_register(0, 0x80);
    step_to(&mut ppu, 241, 1);
    ppu.step();
    assert!(ppu.nmi_pending(), "NMI enabled: raised with vblank");
}

#[test]
fn test_enabling_nmi_mid_vblank_raises_it() {
    let mut ppu = Ppu::new();
    step_to(&mut ppu, 241, 1);
    ppu.step();
    assert!(!ppu.nmi_pending());

    ppu.write_register(0, 0x80);
    assert!(ppu.nmi_pending(), "late enable still fires within vblank");
}

#[test]
fn test_disabling_nmi_cancels_pending() {
    let mut ppu = Ppu::new();
    ppu.write_register(0, 0x80);
    step_to(&mut ppu, 241, 1);
    ppu.step();
    assert!(ppu.nmi_pending());

    ppu.write_register(0, 0x00);
    assert!(!ppu.nmi_pending(), "clearing the enable drops the line");
}

#[test]
fn test_prerender_clears_flags_and_nmi() {
    let mut ppu = Ppu::new();
    ppu.write_register(0, 0x80);
    ppu.ppustatus |= 0x40 | 0x20; // pretend hits from the last frame

    step_to(&mut ppu, 261, 1);
    assert_eq!(ppu.ppustatus & 0x80, 0x80, "vblank held through the blank");

    ppu.step();
    assert_eq!(ppu.ppustatus & 0xE0, 0, "all three flags drop at (261, 1)");
    assert!(!ppu.nmi_pending(), "a pending NMI is withdrawn too");
}

#[test]
fn test_frame_is_341_by_262_dots() {
    let mut ppu = Ppu::new();

    let mut steps = 0u32;
    while !ppu.step() {
        steps += 1;
    }
    assert_eq!(steps + 1, 341 * 262, "one frame is 89,342 dots");
    assert_eq!(ppu.scanline(), 0);
    assert_eq!(ppu.dot(), 0);
    assert_eq!(ppu.frame_count(), 1);
}

#[test]
fn test_take_nmi_consumes_the_line() {
    let mut ppu = Ppu::new();
    ppu.write_register(0, 0x80);
    step_to(&mut ppu, 241, 1);
    ppu.step();

    assert!(ppu.take_nmi());
    assert!(!ppu.take_nmi(), "the line is edge-consumed");
}

#[test]
fn test_status_read_during_vblank_window() {
    let mut ppu = Ppu::new();
    step_to(&mut ppu, 241, 1);
    ppu.step();

    assert_eq!(ppu.read_register(2) & 0x80, 0x80);
    assert_eq!(
        ppu.read_register(2) & 0x80,
        0,
        "second read sees the flag already cleared"
    );

    // The flag does not come back until the next frame's (241, 1)
    step_to(&mut ppu, 250, 0);
    assert_eq!(ppu.ppustatus & 0x80, 0);
}
