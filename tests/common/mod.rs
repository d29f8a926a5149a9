//! A recording bus for host-side tests. Registers are modelled as plain memory; every
//! access is appended to an ordered log.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use fir_stereo::{Mmio, regs};

pub const BASE: usize = 0x4000_0000;
pub const CTRL: usize = BASE + regs::CTRL_OFFSET;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    pub op: Op,
    pub addr: usize,
    pub value: u32,
}

impl Access {
    pub fn read(addr: usize, value: u32) -> Self {
        Self { op: Op::Read, addr, value }
    }

    pub fn write(addr: usize, value: u32) -> Self {
        Self { op: Op::Write, addr, value }
    }
}

#[derive(Default)]
struct State {
    mem: HashMap<usize, u32>,
    log: Vec<Access>,
}

/// Cloning shares the underlying state, so a test can keep a handle after giving one to
/// the driver.
#[derive(Clone, Default)]
pub struct MockMmio {
    state: Rc<RefCell<State>>,
}

impl MockMmio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register without logging an access, eg to model power-on contents.
    pub fn preset(&self, addr: usize, value: u32) {
        self.state.borrow_mut().mem.insert(addr, value);
    }

    /// Current register contents, without logging an access.
    pub fn peek(&self, addr: usize) -> u32 {
        self.state.borrow().mem.get(&addr).copied().unwrap_or(0)
    }

    pub fn log(&self) -> Vec<Access> {
        self.state.borrow().log.clone()
    }

    /// Return the log so far and start a new one.
    pub fn take_log(&self) -> Vec<Access> {
        std::mem::take(&mut self.state.borrow_mut().log)
    }

    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.log()
            .into_iter()
            .filter(|a| a.op == Op::Write)
            .map(|a| (a.addr, a.value))
            .collect()
    }

    /// Values written to CTRL, in order.
    pub fn ctrl_writes(&self) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter(|&(addr, _)| addr == CTRL)
            .map(|(_, value)| value)
            .collect()
    }

    pub fn read_count(&self) -> usize {
        self.log().iter().filter(|a| a.op == Op::Read).count()
    }
}

impl Mmio for MockMmio {
    fn read32(&mut self, addr: usize) -> u32 {
        let mut state = self.state.borrow_mut();
        let value = state.mem.get(&addr).copied().unwrap_or(0);
        state.log.push(Access::read(addr, value));
        value
    }

    fn write32(&mut self, addr: usize, value: u32) {
        let mut state = self.state.borrow_mut();
        state.mem.insert(addr, value);
        state.log.push(Access::write(addr, value));
    }
}

/// Absolute address of coefficient slot `index` at the test base address.
pub fn coeff(index: u32) -> usize {
    BASE + regs::coeff_offset(index)
}
