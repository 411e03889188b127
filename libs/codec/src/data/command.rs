//! Robot command bodies sent by the controller

use super::ProtocolData;
use crate::error::ProtocolResult;
use crate::field::{FieldReader, FieldSpec, ProtocolField};
use serde::{Deserialize, Serialize};

const LEFT_X: FieldSpec = FieldSpec::signed("lx", 1);
const LEFT_Y: FieldSpec = FieldSpec::signed("ly", 1);
const RIGHT_X: FieldSpec = FieldSpec::signed("rx", 1);
const RIGHT_Y: FieldSpec = FieldSpec::signed("ry", 1);

const RED: FieldSpec = FieldSpec::unsigned("red", 1);
const GREEN: FieldSpec = FieldSpec::unsigned("green", 1);
const BLUE: FieldSpec = FieldSpec::unsigned("blue", 1);

/// Raw joystick-style motor command (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CommandMoveRaw {
    pub left_x: i8,
    pub left_y: i8,
    pub right_x: i8,
    pub right_y: i8,
}

impl CommandMoveRaw {
    pub fn new(left_x: i8, left_y: i8, right_x: i8, right_y: i8) -> Self {
        Self {
            left_x,
            left_y,
            right_x,
            right_y,
        }
    }
}

impl ProtocolData for CommandMoveRaw {
    const WIDTH: usize = 4;

    fn fields(&self) -> Vec<ProtocolField> {
        vec![
            LEFT_X.with_value(self.left_x),
            LEFT_Y.with_value(self.left_y),
            RIGHT_X.with_value(self.right_x),
            RIGHT_Y.with_value(self.right_y),
        ]
    }

    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut reader = FieldReader::new(bytes, Self::WIDTH, "CommandMoveRaw body")?;
        Ok(Self {
            left_x: reader.read_i8(&LEFT_X)?,
            left_y: reader.read_i8(&LEFT_Y)?,
            right_x: reader.read_i8(&RIGHT_X)?,
            right_y: reader.read_i8(&RIGHT_Y)?,
        })
    }
}

/// RGB LED color command (3 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CommandRgbLed {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl CommandRgbLed {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl ProtocolData for CommandRgbLed {
    const WIDTH: usize = 3;

    fn fields(&self) -> Vec<ProtocolField> {
        vec![
            RED.with_value(self.red),
            GREEN.with_value(self.green),
            BLUE.with_value(self.blue),
        ]
    }

    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut reader = FieldReader::new(bytes, Self::WIDTH, "CommandRgbLed body")?;
        Ok(Self {
            red: reader.read_u8(&RED)?,
            green: reader.read_u8(&GREEN)?,
            blue: reader.read_u8(&BLUE)?,
        })
    }
}
