use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // The barrier is a Cortex-M instruction; elsewhere (eg host tests) the pulse is two plain stores.
        bus_barrier: { all(feature = "bus-barrier", target_arch = "arm") },
    }
}
