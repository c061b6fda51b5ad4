pub const BANNER: &str = "📊 datadesk - matrix operations, data visualization and linear regression.
Type 'help' for commands, 'guide' for a walkthrough, 'quit' to leave.";

pub const HELP: &str = "COMMANDS
  matrix input a|b          enter a matrix (rows, columns, then one line per row)
  matrix add|sub|mul        A + B, A - B, A × B
  matrix transpose a|b      transpose of one slot
  matrix det a|b            determinant of one slot
  matrix swap|clear|show    exchange, empty or list both slots

  viz sample                load the built-in sales table
  viz load <csv>            load a CSV file
  viz preview               shape, columns and first rows
  viz chart <kind>          bar, scatter, line, histogram, heatmap, pie, box, area
  viz save [path]           save the chart (.html; images with static-export)
  viz clear|zoom|pan        clear the chart or switch its drag mode

  lr housing                load the California housing table
  lr csv <path>             load a CSV and choose its target column
  lr synthetic              generate 100 noisy linear samples
  lr train                  fit ordinary least squares (80/20 split)
  lr predictions            actual vs predicted values
  lr residuals              residuals vs predictions
  lr coefficients           feature importance
  lr metrics                MSE, MAE and R²
  lr save [path]|clear|zoom|pan

  status  reset  guide  about  help  quit";

pub const GUIDE: &str = "📖 HOW TO USE - QUICK GUIDE
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

🧮 MATRIX OPERATIONS:
1. 'matrix input a' → enter dimensions → enter values
2. 'matrix input b' → enter dimensions → enter values
3. Choose an operation: add, sub, mul, transpose, det
4. Type 'cancel' at any prompt to leave the form unchanged

📊 DATA VISUALIZATION:
1. Load data:
   • 'viz load <file.csv>' for your own CSV file
   • 'viz sample' for the built-in sample data
2. 'viz chart <kind>':
   • bar - categorical vs numeric data
   • scatter - relationship between two variables
   • heatmap - correlation between all numeric columns
   • line, histogram, pie, box, area
3. Open the rendered HTML file to zoom, pan and hover

🤖 LINEAR REGRESSION:
1. Load data:
   • 'lr housing' - California Housing dataset
   • 'lr csv <file.csv>' - your CSV file, then pick the target column
   • 'lr synthetic' - generated data with known coefficients
2. 'lr train' - trains the regression model
3. Analyze results:
   • 'lr predictions' - actual vs predicted values
   • 'lr coefficients' - which features matter most
   • 'lr metrics' - performance summary

💡 TIPS:
• All datasets must be in CSV format
• For custom data, numeric columns are detected automatically
• Loading new regression data discards the trained model; train again";

pub const ABOUT: &str = "📊 DATA ANALYSIS & VISUALIZATION TOOL
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

A data analysis workbench combining matrix operations, data
visualization and machine learning in a single command shell.

KEY FEATURES:
✓ Matrix Operations - Add, subtract, multiply, transpose & determinants
✓ Data Visualization - Eight interactive chart kinds rendered with plotly
✓ Linear Regression - Train with predefined, custom or synthetic data

MACHINE LEARNING:
✓ Train models on California Housing data
✓ Load custom datasets from CSV files
✓ Automatic feature scaling
✓ Performance metrics (MAE, MSE, R²)

Built with ndarray, nalgebra, csv and plotly.";
