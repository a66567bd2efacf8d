//! Interpreter-side launch scripts.
//!
//! Each script is passed with `-c`; the application path (and, for the
//! entry-point strategy, the attribute name) arrive through `sys.argv`
//! followed by any pass-through arguments. Whatever the application exits
//! with is the script's exit code.

/// Executes the file as `__main__`. argv: `<app> [args...]`.
pub const RUN_SCRIPT: &str = "\
import os, runpy, sys
app = sys.argv[1]
sys.argv = sys.argv[1:]
sys.path.insert(0, os.path.dirname(os.path.abspath(app)))
try:
    runpy.run_path(app, run_name='__main__')
except SystemExit:
    raise
except Exception as e:
    print(f'Failed to run {os.path.basename(app)}: {e}')
    sys.exit(1)
";

/// Imports the file as a module and calls its entry point.
/// argv: `<app> <attribute> [args...]`.
///
/// Without a callable attribute the file is run as a standalone script
/// from inside this interpreter, so the hand-off stays a single child and
/// its exit code is the script's.
pub const ENTRYPOINT_SCRIPT: &str = "\
import importlib, os, subprocess, sys
app, attr = sys.argv[1], sys.argv[2]
sys.argv = [app] + sys.argv[3:]
sys.path.insert(0, os.path.dirname(os.path.abspath(app)))
try:
    module = importlib.import_module(os.path.splitext(os.path.basename(app))[0])
    func = getattr(module, attr, None)
    if not callable(func):
        sys.stderr.write(f'{os.path.basename(app)} has no callable {attr}(); running it as a script\\n')
        sys.stderr.flush()
        code = subprocess.call([sys.executable, app] + sys.argv[1:])
        sys.exit(code if code >= 0 else 1)
    func()
except SystemExit:
    raise
except Exception as e:
    print(f'Error starting the application: {e}')
    sys.exit(1)
";
