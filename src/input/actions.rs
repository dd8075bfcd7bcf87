use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct PlayerInput;

/// W is +1, S is -1.
#[derive(Debug, InputAction)]
#[action_output(f32)]
pub struct Forward;

/// A is +1 (left), D is -1 (right).
#[derive(Debug, InputAction)]
#[action_output(f32)]
pub struct Turn;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Jump;
