use std::fmt;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Error, Fault};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// Why the CPU stopped for good
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// An instruction could not be fetched, decoded or executed
    Fault(Fault),
    /// The host asked the CPU to stop
    Stopped,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::Fault(fault) => write!(f, "{fault}"),
            HaltReason::Stopped => write!(f, "stopped by host"),
        }
    }
}

/// What the CPU is doing between two steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Suspended on Fx0A until the next key press, which lands in V`register`
    AwaitingKey { register: u8 },
    /// Terminal; no further instructions are fetched
    Halted(HaltReason),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the current `state`
///  - whether it is running, suspended on a key, or halted
///  - the random source used by Cxkk, seeded once on construction
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    status: Status,
    stop_requested: bool,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A Chip-8 whose random numbers are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            status: Status::Running,
            stop_requested: false,
            rng,
        }
    }

    /// Load a rom into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program bytes; at most 3584 of them
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.state.write_memory(PROGRAM_START, rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The current contents of the screen
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn
    /// - the frame is only handed out once per clear or draw
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the host should be playing a tone
    pub fn is_sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of a key
    ///
    /// A press that arrives while an Fx0A is waiting is written into its register
    /// and execution resumes with the following instruction.
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF
    /// * `pressed` whether the key is now down
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), Error> {
        let index = usize::from(key);
        if index >= KEY_COUNT {
            return Err(Error::KeyIndexOutOfRange { key });
        }
        let was_pressed = self.state.keys[index];
        self.state.keys[index] = pressed;

        let halted = matches!(self.status, Status::Halted(_));
        if pressed && !was_pressed && !halted {
            if let Some(register) = self.state.register_needing_key.take() {
                debug!("key {key:X} resumes wait on V{register:X}");
                *self.state.register_mut(register) = key;
                self.state.advance();
                if self.status == (Status::AwaitingKey { register }) {
                    self.status = Status::Running;
                }
            }
        }
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<(), Error> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<(), Error> {
        self.set_key(key, false)
    }

    /// Ask the CPU to halt before its next instruction
    pub fn request_stop(&mut self) {
        info!("stop requested at pc {:#05X}", self.state.pc);
        self.stop_requested = true;
    }

    /// Advances the CPU by a single instruction
    /// - does nothing once halted
    /// - halts if a stop was requested
    /// - does nothing while awaiting a keypress
    /// - otherwise fetches, decodes and executes the instruction at pc
    pub fn step(&mut self) -> Status {
        if let Status::Halted(_) = self.status {
            return self.status;
        }
        if self.stop_requested {
            self.status = Status::Halted(HaltReason::Stopped);
            return self.status;
        }
        if let Some(register) = self.state.register_needing_key {
            self.status = Status::AwaitingKey { register };
            return self.status;
        }

        self.status = match self.execute_next() {
            Ok(()) => match self.state.register_needing_key {
                Some(register) => {
                    debug!("waiting for a key for V{register:X}");
                    Status::AwaitingKey { register }
                }
                None => Status::Running,
            },
            Err(fault) => {
                warn!("halting at pc {:#05X}: {}", self.state.pc, fault);
                Status::Halted(HaltReason::Fault(fault))
            }
        };
        self.status
    }

    /// Steps until the CPU stops running or `max_steps` instructions have been attempted
    pub fn run(&mut self, max_steps: usize) -> Status {
        for _ in 0..max_steps {
            if self.step() != Status::Running {
                break;
            }
        }
        self.status
    }

    /// Counts both timers down by one, stopping at 0.
    /// Hosts call this at 60Hz independently of the CPU speed.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    fn execute_next(&mut self) -> Result<(), Fault> {
        let op = self.state.fetch()?;
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
            self.state.pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        instruction.execute(&mut self.state, &mut self.rng)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
