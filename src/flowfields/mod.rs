//! Flowfields are a means of handling pathfinding for a crowd of actors.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! A map is a single grid of `columns x rows` cells. Three arrays of that size are used to
//! calculate a path from every cell to one shared target:
//!
//! * Cost field - 8-bit field where a value of 255 represents impassable terrain and range 1 - 254
//! represents the cost of traversing that grid location, 1 being the default and easiest
//! * Integration field - uses the cost field as input and stores the calculated cost-to-goal
//! * Flow field - for every cell the direction of the neighbour which is the cheapest step towards the goal
//!
//! ```text
//!  _____________________________
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! ```
//!
//! Cells are addressed as `(column, row)` from the top-left corner, rows grow downwards.
//! [navigation::NavigationFields] owns all three fields and answers the point queries actors make every physics tick
//!

pub mod error;
pub mod fields;
pub mod navigation;
pub mod terrain;
pub mod utilities;
